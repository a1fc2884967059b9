pub mod zap_view;
pub mod modals;

pub use zap_view::*;
