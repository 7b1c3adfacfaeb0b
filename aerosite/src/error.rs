//! Error types used by the crate.

use aerosite_types::AerositeTypesError;
use thiserror::Error;

use crate::id::{ElementId, SiteId};
use crate::layer::{ElementKind, ElementType};
use crate::status::SiteStatus;

/// Aerosite error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AerositeError {
    /// Invalid geometry or coordinates.
    #[error("geometry error: {0}")]
    Geometry(#[from] AerositeTypesError),
    /// A project already holds the maximum number of sites.
    #[error("a project cannot have more than {max} sites")]
    TooManySites {
        /// Maximum number of sites per project.
        max: usize,
    },
    /// Site with the given id does not exist.
    #[error("site {0} not found")]
    SiteNotFound(SiteId),
    /// Two sites of one project share an id.
    #[error("site id {0} is used more than once")]
    DuplicateSiteId(SiteId),
    /// Site position is outside of the project.
    #[error("site index {index} is out of range for a project of {len} sites")]
    SiteIndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Number of sites in the project.
        len: usize,
    },
    /// Map element with the given id does not exist in the site.
    #[error("map element {0} not found")]
    ElementNotFound(ElementId),
    /// Two map elements of one site share an id.
    #[error("map element id {0} is used more than once")]
    DuplicateElementId(ElementId),
    /// Element is stored in the slot of another role.
    #[error("element {id} of type {element_type} is stored in the {slot} slot")]
    MisplacedElement {
        /// Element id.
        id: ElementId,
        /// Role of the slot holding the element.
        slot: ElementType,
        /// Role of the element.
        element_type: ElementType,
    },
    /// Element kind tag does not match its geometry.
    #[error("element {id} is tagged as {found:?} but holds {expected:?} geometry")]
    KindMismatch {
        /// Element id.
        id: ElementId,
        /// Kind of the element geometry.
        expected: ElementKind,
        /// Kind the element is tagged with.
        found: ElementKind,
    },
    /// Status change not allowed by the site lifecycle.
    #[error("cannot change site status from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: SiteStatus,
        /// Requested status.
        to: SiteStatus,
    },
    /// More than one element of a kind is flagged as primary.
    #[error("more than one primary element of type {0}")]
    MultiplePrimary(ElementType),
    /// Element cannot be placed into the requested map data slot.
    #[error("element of type {0} cannot be placed here")]
    InvalidSlot(ElementType),
    /// Color string is not a valid hex color.
    #[error("invalid color: {0}")]
    InvalidColor(String),
}
