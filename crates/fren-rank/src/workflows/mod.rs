pub mod frens;
