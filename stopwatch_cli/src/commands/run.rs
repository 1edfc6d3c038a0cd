use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};
use stopwatch_hdl::prelude::*;
use tracing::{info, warn};

use super::Run;
use crate::{
    domains::{Fast, ZynqMini},
    output::print_status,
    session::{Session, REFRESH_HZ},
    stimulus::Script,
    Env,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Domain {
    /// 100 kHz
    Fast,
    /// 50 MHz
    ZynqMini,
}

impl Domain {
    /// Simulated time when `--duration` is not given. A 50 MHz second takes
    /// about a minute to simulate.
    fn default_duration(&self) -> Bcd {
        match self {
            Self::Fast => Bcd::from_centiseconds(1000),
            Self::ZynqMini => Bcd::from_centiseconds(10),
        }
    }
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Clock domain of the design
    #[arg(long, value_enum, default_value_t = Domain::Fast)]
    domain: Domain,
    /// Simulated time [default: 10.00 for fast, 0.10 for zynq-mini]
    #[arg(short, long)]
    duration: Option<Bcd>,
    /// JSON stimulus script (default: press start at 0.00)
    #[arg(short, long)]
    script: Option<PathBuf>,
    /// Dump a VCD waveform
    #[arg(long)]
    vcd: Option<PathBuf>,
    /// Print every change of the display
    #[arg(short, long)]
    watch: bool,
}

impl Run for RunArgs {
    fn run(&self, env: &Env) -> anyhow::Result<()> {
        let script = match &self.script {
            Some(path) => Script::load(path)?,
            None => Script::start_only(),
        };

        match self.domain {
            Domain::Fast => self.simulate::<Fast>(env, &script),
            Domain::ZynqMini => self.simulate::<ZynqMini>(env, &script),
        }
    }
}

impl RunArgs {
    fn duration(&self) -> Bcd {
        self.duration.unwrap_or_else(|| self.domain.default_duration())
    }

    fn open_tracer(&self) -> anyhow::Result<Option<Tracer>> {
        let Some(path) = self.vcd.as_ref() else {
            return Ok(None);
        };

        let vars = TraceVars::default()
            .add_var("clk", &false)
            .add_var("display", &StopwatchOutput::default())
            .add_var("scan", &ScanOutput::default());

        Tracer::open_vcd(path, vars, "stopwatch", None)
            .map(Some)
            .with_context(|| format!("failed to create {}", path.display()))
    }

    fn simulate<D: ClockDomain>(&self, env: &Env, script: &Script) -> anyhow::Result<()> {
        let cycles_per_cs = centisecond_cycles::<D>();
        let duration = self.duration();
        let duration = duration
            .to_centiseconds()
            .with_context(|| format!("duration {duration} is not a valid time"))?;
        // Edges at 0..=duration plus one cycle to read the result.
        let cycles = duration as usize * cycles_per_cs + 2;

        let schedule = script.schedule(cycles_per_cs)?;
        if let Some(late) = schedule.iter().find(|stimulus| stimulus.cycle > cycles) {
            warn!(cycle = late.cycle, action = ?late.action, "events after the end are ignored");
        }
        let mut schedule = schedule.into_iter().peekable();

        let mut tracer = self.open_tracer()?;
        let mut session = Session::<D>::new(REFRESH_HZ);

        info!(freq = D::FREQ, cycles, "simulating");

        let mut last = None;
        for cycle in 1..=cycles {
            while let Some(stimulus) = schedule.next_if(|stimulus| stimulus.cycle == cycle) {
                session.apply(stimulus.action);
            }

            let (display, scan) = session.step();

            if let Some(tracer) = tracer.as_mut() {
                let time = ((cycle - 1) * D::PERIOD) as u64;
                tracer.dump_time(time)?;
                tracer.trace("clk", &true)?;
                tracer.trace("display", &display)?;
                tracer.trace("scan", &scan)?;
                tracer.dump_time(time + (D::PERIOD / 2) as u64)?;
                tracer.trace("clk", &false)?;
            }

            if self.watch && last != Some(display) {
                let at = Bcd::from_centiseconds(((cycle - 1) / cycles_per_cs) as u32);
                let message = format!(
                    "[{}] {}",
                    render(display.digits, display.mask),
                    if display.running { "running" } else { "paused" }
                );
                print_status(env, &at, Some(&message))?;
            }
            last = Some(display);
        }

        if let Some(mut tracer) = tracer {
            tracer.flush()?;
        }

        if let Some(display) = last {
            let summary = format!("{cycles} cycles at {} Hz", D::FREQ);
            print_status(env, &"Finished", Some(&summary))?;
            let rendered = format!("[{}]", render(display.digits, display.mask));
            print_status(env, &"Display", Some(&rendered))?;
            print_status(env, &"Value", Some(&display))?;
        }

        Ok(())
    }
}
