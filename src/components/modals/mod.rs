pub mod zap_modal;

pub use zap_modal::ZapModal;
