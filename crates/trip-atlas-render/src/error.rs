use std::fmt;

/// The GPU overlay pipeline could not be built.
///
/// Fatal to the GPU path: no partially initialized pipeline is ever handed
/// out, so a host seeing this can fall back to tile rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceError {
    /// The shader failed to compile; `diagnostics` holds the compiler output
    ShaderCompilation { label: String, diagnostics: String },
    /// The pipeline failed validation
    PipelineCreation { label: String, message: String },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShaderCompilation { label, diagnostics } => {
                write!(f, "Shader '{}' failed to compile:\n{}", label, diagnostics)
            }
            Self::PipelineCreation { label, message } => {
                write!(f, "Pipeline '{}' could not be created: {}", label, message)
            }
        }
    }
}

impl std::error::Error for ResourceError {}
