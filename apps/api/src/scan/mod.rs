// Scan flow — what the host UI does when the user asks for tailored bullets:
// stored profile → page inspector → optimizer.

pub mod handlers;
pub mod session;
