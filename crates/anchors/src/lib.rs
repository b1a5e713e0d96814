#![warn(missing_docs)]

//! Anchor frames on CAD solids.
//!
//! An anchor is a named local frame `(p, u, v)` attached to a face or a
//! circular edge of a solid. Solids carrying anchors are
//! [`AnchorableObject`]s; two of them are aligned by superimposing one
//! anchor frame onto another, which yields a rigid transform that can be
//! written into any [`TransformSink`].
//!
//! # Example
//!
//! ```
//! use anchors::{emit, mate, AnchorableObject, Placement};
//! use anchors_geom::Shape;
//!
//! let mut base = AnchorableObject::new("Base", Shape::cube("Block", 10.0, 10.0, 10.0));
//! base.add_anchor("top", "Face2")?;
//!
//! let mut peg = AnchorableObject::new("Peg", Shape::cylinder("Pin", 2.0, 8.0));
//! peg.add_anchor("foot", "Face3")?;
//!
//! let t = mate(&peg, "foot", &base, "top")?;
//! let mut placement = Placement::default();
//! emit(&t, &mut placement);
//! # Ok::<(), anchors::AnchorError>(())
//! ```

pub mod anchor;
pub mod derive;
pub mod error;
pub mod frame;
pub mod object;
pub mod record;
pub mod settings;
pub mod sink;
pub mod superimpose;

pub use anchor::Anchor;
pub use derive::{derive_frame, derive_named, frame_from_circular_edge, frame_from_face};
pub use error::{AnchorError, Result};
pub use frame::Frame;
pub use object::{mate, AnchorableObject};
pub use record::{AnchorRecord, FrameRecord};
pub use settings::AnchorSettings;
pub use sink::{emit, Placement, TransformSink};
pub use superimpose::{superimpose, superimpose_batch, superimpose_points, superimpose_unflipped};
