//! Outward-facing actions: posting highlight announcements and unfollowing
//! removal candidates behind an operator confirmation.

use std::io::{BufRead, Write};

use tracing::{info, warn};

use super::domain::{Account, AccountId};
use super::report::{describe_candidate, HighlightPage};
use super::selection::RemovalCandidate;

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("publishing failed: {0}")]
    Publish(String),
    #[error("unable to remove relationship with {handle}: {reason}")]
    Relationship { handle: String, reason: String },
    #[error("operator prompt failed: {0}")]
    Prompt(#[from] std::io::Error),
}

/// Destination for highlight announcement posts.
pub trait HighlightPublisher {
    fn publish(&self, text: &str) -> Result<(), ActionError>;
}

/// Ends a follow relationship on the social network.
pub trait RelationshipGateway {
    fn unfollow(&self, account: &Account) -> Result<(), ActionError>;
}

/// Publish pages in order. Stops at the first failure; earlier pages stay
/// published.
pub fn publish_highlights<P: HighlightPublisher + ?Sized>(
    pages: &[HighlightPage],
    publisher: &P,
) -> Result<usize, ActionError> {
    for page in pages {
        publisher.publish(&page.render())?;
        info!(page = page.number, total = page.total, "published highlight page");
    }
    Ok(pages.len())
}

/// Operator's answer to a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

/// Asks the operator to type an exact phrase before an irreversible action.
pub struct ConfirmationGate<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConfirmationGate<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn phrase_for(account: &Account) -> String {
        format!("yes, unfollow @{}", account.handle)
    }

    /// Print `details`, then prompt. Anything other than the exact phrase
    /// (ignoring the trailing newline) counts as a decline, including EOF.
    pub fn confirm(&mut self, details: &str, phrase: &str) -> Result<Confirmation, ActionError> {
        write!(self.output, "{details}")?;
        write!(self.output, "Type '{phrase}' to proceed: ")?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        let answer = answer.trim_end_matches(['\r', '\n']);

        Ok(if answer == phrase {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        })
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }
}

/// Result of a pruning batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneOutcome {
    pub removed: Vec<AccountId>,
    /// Candidates left untouched because the operator declined.
    pub skipped: Vec<AccountId>,
    pub cancelled: bool,
}

/// Unfollow candidates one by one, each behind its own confirmation.
///
/// A declined confirmation cancels the rest of the batch; accounts already
/// unfollowed earlier in the batch stay unfollowed.
pub fn prune_candidates<R, W, G>(
    candidates: &[RemovalCandidate],
    gate: &mut ConfirmationGate<R, W>,
    gateway: &G,
) -> Result<PruneOutcome, ActionError>
where
    R: BufRead,
    W: Write,
    G: RelationshipGateway + ?Sized,
{
    let mut outcome = PruneOutcome::default();

    for (position, candidate) in candidates.iter().enumerate() {
        let account = &candidate.account;
        let phrase = ConfirmationGate::<R, W>::phrase_for(account);

        match gate.confirm(&describe_candidate(candidate), &phrase)? {
            Confirmation::Confirmed => {
                gateway.unfollow(account)?;
                info!(fren = %account.handle, "unfollowed");
                outcome.removed.push(account.id.clone());
            }
            Confirmation::Declined => {
                warn!(fren = %account.handle, "confirmation declined, cancelling batch");
                writeln!(gate.output(), "Cancelled; no further accounts were touched.")?;
                outcome.cancelled = true;
                outcome.skipped = candidates[position..]
                    .iter()
                    .map(|candidate| candidate.account.id.clone())
                    .collect();
                break;
            }
        }
    }

    Ok(outcome)
}
