mod command;
mod model;
mod render;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
