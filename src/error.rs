use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("No saved login state at {path} (run the browser login helper, then retry)")]
    AuthMissing { path: String },

    #[error("Balance query failed (the saved login state may have expired)")]
    UserUnavailable,

    #[error("Usage endpoint unavailable")]
    UsageUnavailable,

    #[error("Pricing endpoint unavailable")]
    PricingUnavailable,

    #[error("No pricing history yet. Run `gatecost prices` first.")]
    HistoryEmpty,
}
