// Local profile: the user's master resume and style sample, last write wins.

pub mod handlers;
pub mod store;
