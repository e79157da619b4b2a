pub mod export_service;
pub mod notifier;
