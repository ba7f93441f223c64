mod command;
mod daily;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
