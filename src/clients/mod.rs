pub mod kahoot_client;

pub use kahoot_client::KahootClient;
