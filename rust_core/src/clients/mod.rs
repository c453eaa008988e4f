pub mod cfbd;

// Re-export commonly used types
pub use cfbd::CfbdClient;
