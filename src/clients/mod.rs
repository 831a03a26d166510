pub mod publisher;
pub mod slack;
pub mod sns;
pub mod ssm;
