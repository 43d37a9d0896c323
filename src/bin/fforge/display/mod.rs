mod banner;
mod error;
mod progress;
mod report;
mod tables;

pub use banner::{banner_for_help, print_banner};
pub use error::print_error;
pub use progress::Progress;
pub use report::{print_formula_error, print_imbalance};
pub use tables::{print_element_distribution, print_partial, print_run_summary};

#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub interactive: bool,
    pub quiet: bool,
}

impl Context {
    pub fn detect() -> Self {
        Self {
            interactive: crate::io::stderr_is_tty(),
            quiet: false,
        }
    }

    pub fn with_quiet(self, quiet: bool) -> Self {
        if quiet {
            Self {
                interactive: false,
                quiet: true,
            }
        } else {
            self
        }
    }
}
