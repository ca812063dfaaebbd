use emul8080::RunOptions;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = RunOptions::from_args(std::env::args().skip(1))?;
    emul8080::run(&options)?;
    Ok(())
}
