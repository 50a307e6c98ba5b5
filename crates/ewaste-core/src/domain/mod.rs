//! Domain entities - the records the client displays and the forms it fills in.

mod filter;
mod location;
mod profile;
mod request;
mod route;
mod session;
mod status;
mod tracking;
mod wizard;

pub use filter::RequestQuery;
pub use location::{Place, coordinates_label};
pub use profile::{Profile, ProfileUpdate};
pub use request::{
    Condition, DeviceType, ImageUpload, MAX_IMAGE_BYTES, MAX_QUANTITY, PickupRequest,
    RequestDraft, RequestSubmission,
};
pub use route::Route;
pub use session::{Session, StorageKey, Theme};
pub use status::{RequestStatus, StatusFilter};
pub use tracking::{StepState, TimelineStep, timeline};
pub use wizard::{RequestWizard, WizardStep};
