//! Command line arguments trait and default implementation.
//!
//! Uses clap for CLI parsing on native targets, with help text (`--help`)
//! and validation.

/// Trait for parsing command line arguments.
///
/// Every accessor has a default, so implementations only override the
/// options they care about.
///
/// # Example
///
/// ```ignore
/// use nk_app::AppArgs;
///
/// struct MyArgs {
///     verbose: bool,
/// }
///
/// impl AppArgs for MyArgs {
///     fn parse() -> Self {
///         Self {
///             verbose: std::env::args().any(|a| a == "--verbose"),
///         }
///     }
///
///     fn log_level(&self) -> &str {
///         if self.verbose { "trace" } else { "info" }
///     }
/// }
/// ```
pub trait AppArgs: Sized {
    /// Parse command line arguments.
    fn parse() -> Self;

    /// Get the initial window width.
    ///
    /// Default: 1280
    fn window_width(&self) -> u32 {
        1280
    }

    /// Get the initial window height.
    ///
    /// Default: 720
    fn window_height(&self) -> u32 {
        720
    }

    /// Get the window title.
    ///
    /// Default: "nk"
    fn window_title(&self) -> &str {
        "nk"
    }

    /// Get the maximum number of frames to process before auto-exit.
    ///
    /// Useful for automated runs that only need to verify startup.
    ///
    /// Default: `None` (run indefinitely)
    fn max_frames(&self) -> Option<u64> {
        None
    }

    /// Frames per second the runner paces itself to. `None` runs unpaced.
    ///
    /// Default: 60
    fn target_fps(&self) -> Option<u32> {
        Some(60)
    }

    /// Default log filter, used when `RUST_LOG` is not set.
    ///
    /// Default: "info"
    fn log_level(&self) -> &str {
        "info"
    }

    /// Report unaccelerated mouse motion as `MouseRaw` events.
    ///
    /// Default: false
    fn raw_mouse(&self) -> bool {
        false
    }
}

/// Default command line arguments implementation.
///
/// On native platforms, uses clap for parsing with help text.
/// On WASM, uses defaults.
///
/// # Examples
///
/// ```bash
/// # Show help
/// ./my_app --help
///
/// # Run for 100 frames then exit (useful for testing)
/// ./my_app --max-frames 100
///
/// # Trace every dropped native message
/// ./my_app --log-level trace --raw-mouse
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultAppArgs {
    width: u32,
    height: u32,
    title: String,
    max_frames: Option<u64>,
    target_fps: Option<u32>,
    log_level: String,
    raw_mouse: bool,
}

impl Default for DefaultAppArgs {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "nk".to_string(),
            max_frames: None,
            target_fps: Some(60),
            log_level: "info".to_string(),
            raw_mouse: false,
        }
    }
}

impl DefaultAppArgs {
    /// Create new default args with a custom title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the window size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the maximum number of frames.
    pub fn with_max_frames(mut self, max_frames: u64) -> Self {
        self.max_frames = Some(max_frames);
        self
    }

    pub fn with_target_fps(mut self, target_fps: Option<u32>) -> Self {
        self.target_fps = target_fps;
        self
    }

    pub fn with_raw_mouse(mut self, raw_mouse: bool) -> Self {
        self.raw_mouse = raw_mouse;
        self
    }
}

// ============================================================================
// Native implementation using clap
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;
    use clap::Parser;

    /// nk application arguments.
    #[derive(Parser, Debug)]
    #[command(
        name = "nk",
        about = "Application driven by nk canonical input events",
        long_about = "Opens a window and feeds every native input event through the \
            nk event dispatcher.\n\n\
            LOGGING:\n\
            RUST_LOG overrides --log-level. Unmapped native messages are \
            reported at trace level.\n\
            \n\
            EXAMPLES:\n\
              # Exit after 10 frames\n\
              ./app --max-frames 10\n\
            \n\
              # Unpaced loop with raw mouse motion\n\
              ./app --fps 0 --raw-mouse",
        version
    )]
    pub(super) struct ClapArgs {
        /// Window title.
        #[arg(long)]
        pub title: Option<String>,

        /// Initial window width in pixels.
        #[arg(long, default_value = "1280", value_parser = clap::value_parser!(u32).range(1..))]
        pub width: u32,

        /// Initial window height in pixels.
        #[arg(long, default_value = "720", value_parser = clap::value_parser!(u32).range(1..))]
        pub height: u32,

        /// Exit after N frames (useful for testing).
        #[arg(long)]
        pub max_frames: Option<u64>,

        /// Frame rate to pace the loop to; 0 disables pacing.
        #[arg(long, default_value = "60")]
        pub fps: u32,

        /// Log filter used when RUST_LOG is not set.
        #[arg(long, default_value = "info")]
        pub log_level: String,

        /// Report unaccelerated mouse motion.
        #[arg(long)]
        pub raw_mouse: bool,
    }

    impl From<ClapArgs> for DefaultAppArgs {
        fn from(args: ClapArgs) -> Self {
            Self {
                width: args.width,
                height: args.height,
                title: args.title.unwrap_or_else(|| "nk".to_string()),
                max_frames: args.max_frames,
                target_fps: (args.fps > 0).then_some(args.fps),
                log_level: args.log_level,
                raw_mouse: args.raw_mouse,
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn parse(args: &[&str]) -> DefaultAppArgs {
            let argv = std::iter::once("nk").chain(args.iter().copied());
            ClapArgs::try_parse_from(argv).unwrap().into()
        }

        #[test]
        fn defaults_match_the_trait() {
            assert_eq!(parse(&[]), DefaultAppArgs::default());
        }

        #[test]
        fn zero_fps_disables_pacing() {
            let args = parse(&["--fps", "0", "--max-frames", "3", "--raw-mouse"]);
            assert_eq!(args.target_fps(), None);
            assert_eq!(args.max_frames(), Some(3));
            assert!(args.raw_mouse());
        }

        #[test]
        fn zero_width_is_rejected() {
            assert!(ClapArgs::try_parse_from(["nk", "--width", "0"]).is_err());
        }
    }
}

impl AppArgs for DefaultAppArgs {
    fn parse() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            use clap::Parser;
            let clap_args = native::ClapArgs::parse();
            clap_args.into()
        }

        #[cfg(target_arch = "wasm32")]
        {
            // On WASM, just use defaults (no CLI)
            Self::default()
        }
    }

    fn window_width(&self) -> u32 {
        self.width
    }

    fn window_height(&self) -> u32 {
        self.height
    }

    fn window_title(&self) -> &str {
        &self.title
    }

    fn max_frames(&self) -> Option<u64> {
        self.max_frames
    }

    fn target_fps(&self) -> Option<u32> {
        self.target_fps
    }

    fn log_level(&self) -> &str {
        &self.log_level
    }

    fn raw_mouse(&self) -> bool {
        self.raw_mouse
    }
}
