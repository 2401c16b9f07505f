pub mod checkbox;
pub mod select;
pub mod textarea;

pub use checkbox::Checkbox;
pub use select::Select;
pub use textarea::Textarea;
