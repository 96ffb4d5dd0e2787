use groupmap::config::ServerConfig;
use groupmap::descriptor::Descriptor;
use groupmap::error::AppError;
use groupmap::field_generator::FieldGenerator;
use groupmap::pipeline::build_marked_field;
use groupmap::server::FieldServer;
use log::{error, info};

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

fn run() -> Result<(), AppError> {
    let config = ServerConfig::from_env()?;

    let descriptor = Descriptor::load(&config.descriptor_path)?;
    info!(
        "descriptor {}: width={} height={} colors={}",
        config.descriptor_path.display(),
        descriptor.width,
        descriptor.height,
        descriptor.num_colors
    );

    let mut generator = match config.seed {
        Some(seed) => FieldGenerator::new(seed),
        None => FieldGenerator::from_time(),
    };
    let marked = build_marked_field(&descriptor, &mut generator)?;

    let server = FieldServer::bind(config.bind_addr, marked.field)?;
    server.run(config.workers)
}

fn main() {
    init_logging();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}
