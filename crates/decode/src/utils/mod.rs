mod calls;

// re-export
pub use calls::Dex2Call;
