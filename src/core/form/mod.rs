//! Interactive study-form state
//!
//! [`FormSession`] ties the subject list and scalar fields to the feasibility
//! checks. Each user action mutates state, pushes the recomputed values to the
//! [`Presenter`], and then notifies subscribers through the [`EventBus`].

pub mod events;
pub mod fields;
pub mod input;
pub mod payload;
pub mod presenter;
pub mod session;
pub mod subject_list;

pub use events::{EntryField, EntryId, EventBus, Field, FormEvent, FormField};
pub use fields::FormFields;
pub use input::{load_seed, FormInput};
pub use payload::SubmissionPayload;
pub use presenter::{Presenter, PresenterUpdate, RecordingPresenter};
pub use session::{FormPhase, FormSession, SubmitError, Submission, DEFAULT_SUBMIT_DELAY};
pub use subject_list::{count_label, SubjectList};
