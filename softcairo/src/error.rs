//! Status codes and error types for softcairo.
//!
//! Every surface, pattern, and context carries a sticky [`Status`]. The first
//! failure poisons the object; later mutating calls become no-ops. Fallible
//! operations additionally return a [`CairoError`] so callers can use `?`.

use thiserror::Error;

/// Result type alias using CairoError.
pub type CairoResult<T> = Result<T, CairoError>;

/// Closed set of status codes shared by every object in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Error)]
pub enum Status {
    #[default]
    #[error("no error has occurred")]
    Success,
    #[error("out of memory")]
    NoMemory,
    #[error("cairo_restore() without matching cairo_save()")]
    InvalidRestore,
    #[error("no saved group to pop, i.e. cairo_pop_group() without matching cairo_push_group()")]
    InvalidPopGroup,
    #[error("no current point")]
    NoCurrentPoint,
    #[error("invalid matrix (not invertible)")]
    InvalidMatrix,
    #[error("invalid value for an input cairo_status_t")]
    InvalidStatus,
    #[error("NULL pointer")]
    NullPointer,
    #[error("input string not valid UTF-8")]
    InvalidString,
    #[error("input path data not valid")]
    InvalidPathData,
    #[error("error while reading from input stream")]
    ReadError,
    #[error("error while writing to output stream")]
    WriteError,
    #[error("the target surface has been finished")]
    SurfaceFinished,
    #[error("the surface type is not appropriate for the operation")]
    SurfaceTypeMismatch,
    #[error("the pattern type is not appropriate for the operation")]
    PatternTypeMismatch,
    #[error("invalid value for an input cairo_content_t")]
    InvalidContent,
    #[error("invalid value for an input cairo_format_t")]
    InvalidFormat,
    #[error("invalid value for an input Visual*")]
    InvalidVisual,
    #[error("file not found")]
    FileNotFound,
    #[error("invalid value for a dash setting")]
    InvalidDash,
    #[error("invalid value for a DSC comment")]
    InvalidDscComment,
    #[error("invalid index passed to getter")]
    InvalidIndex,
    #[error("clip region not representable in desired format")]
    ClipNotRepresentable,
    #[error("error creating or writing to a temporary file")]
    TempFileError,
    #[error("invalid value for stride")]
    InvalidStride,
    #[error("the font type is not appropriate for the operation")]
    FontTypeMismatch,
    #[error("the user-font is immutable")]
    UserFontImmutable,
    #[error("error occurred in a user-font callback function")]
    UserFontError,
    #[error("negative number used where it is not allowed")]
    NegativeCount,
    #[error("input clusters do not represent the accompanying text and glyph arrays")]
    InvalidClusters,
    #[error("invalid value for an input cairo_font_slant_t")]
    InvalidSlant,
    #[error("invalid value for an input cairo_font_weight_t")]
    InvalidWeight,
    #[error("invalid value (typically too big) for the size of the input (surface, pattern, etc.)")]
    InvalidSize,
    #[error("user-font method not implemented")]
    UserFontNotImplemented,
    #[error("the device type is not appropriate for the operation")]
    DeviceTypeMismatch,
    #[error("an operation to the device caused an unspecified error")]
    DeviceError,
    #[error("invalid operation during mesh pattern construction")]
    InvalidMeshConstruction,
    #[error("the target device has been finished")]
    DeviceFinished,
    #[error("CAIRO_MIME_TYPE_JBIG2_GLOBAL_ID used but no CAIRO_MIME_TYPE_JBIG2_GLOBAL data provided")]
    Jbig2GlobalMissing,
    #[error("error occurred in libpng while reading from or writing to a PNG file")]
    PngError,
    #[error("error occurred in libfreetype")]
    FreetypeError,
    #[error("error occurred in the Windows Graphics Device Interface")]
    Win32GdiError,
    #[error("invalid tag name, attributes, or nesting")]
    TagError,
    #[error("error occurred in the Windows Direct Write API")]
    DwriteError,
    #[error("error occurred in OpenType-SVG font rendering")]
    SvgFontError,
    #[error("<unknown error status>")]
    LastStatus,
}

impl Status {
    /// Whether this is [`Status::Success`].
    pub fn is_success(self) -> bool {
        self == Status::Success
    }

    /// Convert to a `Result`, mapping `Success` to `Ok(())`.
    pub fn to_result(self) -> CairoResult<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(self.into())
        }
    }
}

/// An error status with an optional detail message.
///
/// Two errors compare equal when their status codes match, regardless of the
/// message, so callers can match on error categories.
#[derive(Debug, Clone, Error)]
#[error("{}{}", .status, .message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct CairoError {
    status: Status,
    message: Option<String>,
}

impl CairoError {
    /// Create an error carrying a detail message.
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
        }
    }

    /// The status code of this error.
    pub fn status(&self) -> Status {
        self.status
    }

    /// The detail message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl PartialEq for CairoError {
    fn eq(&self, other: &Self) -> bool {
        self.status == other.status
    }
}

impl Eq for CairoError {}

impl PartialEq<Status> for CairoError {
    fn eq(&self, other: &Status) -> bool {
        self.status == *other
    }
}

impl From<Status> for CairoError {
    fn from(status: Status) -> Self {
        Self {
            status,
            message: None,
        }
    }
}

impl From<png::EncodingError> for CairoError {
    fn from(err: png::EncodingError) -> Self {
        match err {
            png::EncodingError::IoError(e) => CairoError::new(Status::WriteError, e.to_string()),
            other => CairoError::new(Status::PngError, other.to_string()),
        }
    }
}

impl From<png::DecodingError> for CairoError {
    fn from(err: png::DecodingError) -> Self {
        match err {
            png::DecodingError::IoError(e) => CairoError::new(Status::ReadError, e.to_string()),
            other => CairoError::new(Status::PngError, other.to_string()),
        }
    }
}
