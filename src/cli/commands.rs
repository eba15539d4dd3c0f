use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Flags shared by every generation command.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// The `github` context as JSON, or `@path` to a file holding it
    #[arg(long = "github-context", env = "GITHUB_CONTEXT")]
    pub github_context: String,

    /// The `runner` context as JSON, or `@path` to a file holding it
    #[arg(long = "runner-context", env = "RUNNER_CONTEXT")]
    pub runner_context: String,

    /// Where to write the provenance statement
    #[arg(long = "output-path", default_value = "provenance.json")]
    pub output_path: PathBuf,

    /// JSON files with extra materials (comma-separated)
    #[arg(long = "extra-materials", value_delimiter = ',')]
    pub extra_materials: Vec<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum GenerateCommands {
    /// Generate provenance for a container image
    Container {
        #[command(flatten)]
        common: CommonArgs,

        /// Image repository, e.g. ghcr.io/acme/app
        #[arg(long = "repository")]
        repository: String,

        /// Image digest (sha256:<hex>); skips the registry lookup
        #[arg(long = "digest")]
        digest: Option<String>,

        /// Image tags (comma-separated)
        #[arg(long = "tags", value_delimiter = ',')]
        tags: Vec<String>,

        /// Platform to select from an image index, as os/arch[/variant]
        #[arg(long = "platform")]
        platform: Option<String>,

        /// Registries to reach over plain HTTP (comma-separated)
        #[arg(long = "insecure-registry", value_delimiter = ',')]
        insecure_registry: Vec<String>,

        /// Registry user name
        #[arg(long = "registry-username", env = "REGISTRY_USERNAME")]
        registry_username: Option<String>,

        /// Registry password
        #[arg(
            long = "registry-password",
            env = "REGISTRY_PASSWORD",
            hide_env_values = true
        )]
        registry_password: Option<String>,
    },
    /// Generate provenance for files in a directory
    Files {
        #[command(flatten)]
        common: CommonArgs,

        /// File or directory holding the build artifacts
        #[arg(long = "artifact-path")]
        artifact_path: PathBuf,
    },
}
