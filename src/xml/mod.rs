//! XML reading and writing.

pub mod deserialize;
pub mod errors;
pub mod node;
pub mod quick;
pub mod serialize;

pub use deserialize::{DeserializeError, read_sedml, read_sedml_from_string};
pub use errors::{ErrorCode, ErrorContext, ErrorLog, SedError, Severity};
pub use node::{XmlElement, XmlNode};
pub use serialize::{
    SerializeError, WriteOptions, write_sedml, write_sedml_to_string,
    write_sedml_to_string_with_options, write_sedml_with_options,
};
