fn main() -> anyhow::Result<()> {
    stopwatch_cli::run_cli()
}
