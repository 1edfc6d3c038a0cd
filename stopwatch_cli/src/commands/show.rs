use clap::Args;
use stopwatch_hdl::{bcd::DIGITS, prelude::*};
use tracing::warn;

use super::Run;
use crate::{output::print_status, Env};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Time value: HH:MM:SS.cc, MM:SS.cc, SS.cc, SS or a packed 0x value
    value: Bcd,
    /// Print the seven-segment pattern of every position
    #[arg(short, long)]
    segments: bool,
}

impl Run for ShowArgs {
    fn run(&self, env: &Env) -> anyhow::Result<()> {
        let value = self.value;
        if !value.is_valid() {
            warn!(%value, "some digits exceed their maximum");
        }

        let mask = DisplayMask::from_digits(value);
        print_status(env, &"Value", Some(&value))?;
        print_status(env, &"Packed", Some(&format!("{value:#010x}")))?;
        print_status(env, &"Mask", Some(&mask))?;
        print_status(env, &"Display", Some(&format!("[{}]", render(value, mask))))?;

        if self.segments {
            let display = StopwatchOutput {
                digits: value,
                mask,
                running: false,
            };
            for pos in (0..DIGITS).rev() {
                let out = ScanOutput::select(pos, &display);
                let status = format!("Digit {pos}");
                if out.anode == 0 {
                    print_status(env, &status, Some(&"blank"))?;
                } else {
                    print_status(env, &status, Some(&out.segments))?;
                }
            }
        }

        Ok(())
    }
}
