//! Submission dispatch: one panel submit, one collaborator call.
//!
//! Failures are absorbed here. The cause is written to the diagnostic log
//! and the caller only learns which action failed.

use std::fmt;

use crate::domain::{Identity, Registration, RetrievedRecord, UploadReceipt, UploadRequest};
use crate::ports::RecordService;

/// The three panel actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Register,
    Upload,
    Retrieve,
}

impl Action {
    /// Static alert text shown when a remote call for this action fails.
    #[must_use]
    pub fn failure_message(self) -> &'static str {
        match self {
            Action::Register => "Failed to register user",
            Action::Upload => "Failed to upload file",
            Action::Retrieve => "Failed to retrieve record",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Register => "register",
            Action::Upload => "upload",
            Action::Retrieve => "retrieve",
        })
    }
}

/// A validated request produced by a panel submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Register(Registration),
    Upload(UploadRequest),
    Retrieve { record_id: String },
}

impl Submission {
    #[must_use]
    pub fn action(&self) -> Action {
        match self {
            Submission::Register(_) => Action::Register,
            Submission::Upload(_) => Action::Upload,
            Submission::Retrieve { .. } => Action::Retrieve,
        }
    }
}

/// Settled result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Registered(Identity),
    Uploaded(UploadReceipt),
    Retrieved(RetrievedRecord),
    /// The call failed; the cause has already been logged.
    Failed(Action),
}

impl Outcome {
    #[must_use]
    pub fn action(&self) -> Action {
        match self {
            Outcome::Registered(_) => Action::Register,
            Outcome::Uploaded(_) => Action::Upload,
            Outcome::Retrieved(_) => Action::Retrieve,
            Outcome::Failed(action) => *action,
        }
    }
}

/// Run a submission against the service.
///
/// Makes exactly one call and never retries.
pub fn execute<S: RecordService + ?Sized>(service: &S, submission: &Submission) -> Outcome {
    let action = submission.action();
    let result = match submission {
        Submission::Register(registration) => {
            service.register(registration).map(Outcome::Registered)
        }
        Submission::Upload(request) => service.upload(request).map(Outcome::Uploaded),
        Submission::Retrieve { record_id } => {
            service.retrieve(record_id).map(Outcome::Retrieved)
        }
    };

    match result {
        Ok(outcome) => {
            tracing::info!(%action, "Request completed");
            outcome
        }
        Err(e) => {
            tracing::error!(%action, error = %e, "Request failed");
            Outcome::Failed(action)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("service unavailable")]
    struct Unavailable;

    struct DownService;

    impl RecordService for DownService {
        type Error = Unavailable;

        fn register(&self, _: &Registration) -> Result<Identity, Unavailable> {
            Err(Unavailable)
        }

        fn upload(&self, _: &UploadRequest) -> Result<UploadReceipt, Unavailable> {
            Err(Unavailable)
        }

        fn retrieve(&self, record_id: &str) -> Result<RetrievedRecord, Unavailable> {
            if record_id == "known" {
                Ok(RetrievedRecord {
                    record_id: "known".into(),
                    patient_id: "p1".into(),
                    file_size: 3,
                    status: "ok".into(),
                })
            } else {
                Err(Unavailable)
            }
        }
    }

    #[test]
    fn test_failures_collapse_to_action() {
        let submission = Submission::Register(Registration::new("Test User", Default::default()));
        assert_eq!(execute(&DownService, &submission), Outcome::Failed(Action::Register));

        let upload = Submission::Upload(UploadRequest::new("p1", "scan.pdf"));
        assert_eq!(execute(&DownService, &upload), Outcome::Failed(Action::Upload));
    }

    #[test]
    fn test_success_passes_body_through() {
        let outcome = execute(
            &DownService,
            &Submission::Retrieve {
                record_id: "known".into(),
            },
        );
        match outcome {
            Outcome::Retrieved(record) => assert_eq!(record.file_size, 3),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_failure_messages_name_the_action() {
        assert_eq!(Action::Register.failure_message(), "Failed to register user");
        assert_eq!(Action::Upload.failure_message(), "Failed to upload file");
        assert_eq!(Action::Retrieve.failure_message(), "Failed to retrieve record");
    }
}
