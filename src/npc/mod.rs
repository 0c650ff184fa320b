pub mod registry;
pub mod simple_strategy;
pub mod subscriber;
pub mod toss;
pub mod types;

pub use registry::NpcRegistry;
pub use simple_strategy::SimpleNpc;
pub use subscriber::NpcSubscriber;
pub use toss::{toss_stats, TossStats};
pub use types::{NpcPlayer, NpcStrategy};
