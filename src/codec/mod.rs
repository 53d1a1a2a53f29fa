//! Generic transcoding between [`Value`] trees and XML.
//!
//! Decoding is structural: every leaf is text, nothing is coerced. A field that may hold one or
//! many elements decodes to a single value when exactly one element is present; call
//! [`as_sequence`] where a list is expected.
//!
//! Empty containers do not survive a round trip: an empty map comes back as `""` and an empty
//! list, which encodes to nothing, comes back absent.

mod decode;
mod encode;
mod normalize;
mod value;

pub use decode::from_xml;
pub use encode::{DEFAULT_ROOT, to_xml, to_xml_with_root};
pub use normalize::as_sequence;
pub use value::{ATTRIBUTES_KEY, Attributed, Map, Scalar, TEXT_KEY, Value};
