// Parser module - line lexing, format and module detection, function extraction

pub mod blocks;
pub mod extractor;
pub mod format;
pub mod module_type;
pub mod source;

pub use blocks::BlockTracker;
pub use extractor::{extract_functions, Extraction, FunctionExtractor};
pub use format::{detect_format, FormatDetector};
pub use module_type::{detect_module_type, ModuleTypeDetector};
pub use source::{split_lines, SourceLine};
