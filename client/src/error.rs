use anchor_lang::error::Error;
use anchor_lang::prelude::*;
use team_vesting::VestingError;

/// Off-chain failures. Offset keeps codes clear of the program's 6000 range.
#[error_code(offset = 7000)]
pub enum DistributorError {
    #[msg("Required configuration value is missing")]
    MissingConfig,

    #[msg("Configuration value could not be parsed")]
    InvalidConfig,

    #[msg("Transaction submission failed")]
    SubmissionFailed,

    #[msg("Transaction confirmation timed out")]
    ConfirmationTimeout,

    #[msg("Account data could not be fetched")]
    AccountFetchFailed,

    #[msg("Run log could not be written")]
    RunLogUnavailable,
}

/// How the sweep treats a failed submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// The program answered `NothingToClaim`: someone else claimed first.
    NothingToClaim,
    /// Rejected by the program. Never retried.
    Program,
    /// Submission or confirmation failed. Retried within budget.
    Transport,
    Other,
}

pub fn classify(err: &Error) -> FailureKind {
    match err {
        Error::AnchorError(e) => {
            let code = e.error_code_number;
            if code == u32::from(VestingError::NothingToClaim) {
                FailureKind::NothingToClaim
            } else if code == u32::from(DistributorError::SubmissionFailed)
                || code == u32::from(DistributorError::ConfirmationTimeout)
            {
                FailureKind::Transport
            } else if (u32::from(VestingError::Unauthorized)..u32::from(DistributorError::MissingConfig))
                .contains(&code)
            {
                FailureKind::Program
            } else {
                FailureKind::Other
            }
        }
        Error::ProgramError(_) => FailureKind::Program,
    }
}
