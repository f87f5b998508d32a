mod dialect_name;
mod setting;

pub use dialect_name::DialectName;
pub use setting::Setting;
