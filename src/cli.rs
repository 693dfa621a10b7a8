//! Command line options shared by the tutorial programs.

use clap::Args;

use crate::viewer::ViewerConfig;

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowArgs {
    /// Window width in logical pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height in logical pixels.
    #[arg(long)]
    pub height: Option<u32>,

    /// Window title.
    #[arg(long)]
    pub title: Option<String>,

    /// Samples per pixel for multisampling, 0 to disable.
    #[arg(long)]
    pub samples: Option<u16>,
}

impl WindowArgs {
    /// Applies the flags that were given on top of the default config.
    pub fn config(&self) -> ViewerConfig {
        let defaults = ViewerConfig::default();

        ViewerConfig {
            title: self.title.clone().unwrap_or(defaults.title),
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            multisampling: self.samples.unwrap_or(defaults.multisampling),
            ..defaults
        }
    }
}
