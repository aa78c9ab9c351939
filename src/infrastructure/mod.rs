pub mod sumup;
