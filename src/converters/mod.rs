//! Shipped converters.

mod anything_to_string;
mod string_to_array;
mod string_to_big_number;
mod string_to_bool;
mod string_to_collection;
mod string_to_number;
mod string_to_time;

pub use anything_to_string::AnythingToStringConverter;
pub use string_to_array::StringToArrayConverter;
pub use string_to_big_number::StringToBigNumberConverter;
pub use string_to_bool::StringToBooleanConverter;
pub use string_to_collection::StringToCollectionConverter;
pub use string_to_number::{StringToNumberConverter, parse_number};
pub use string_to_time::{StringToTimeConverter, TimeFormats};
