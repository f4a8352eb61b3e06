use base64_codec::{create_server, Configuration, Error, Logger, State};
use std::{net::SocketAddr, process, sync::Arc};

fn run(configuration: Configuration, logger: Logger) -> Result<(), Error> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(configuration.threads())
        .enable_all()
        .build()
        .map_err(|error| Error::new(format!("Could not start runtime: {}", error)))?;

    let state = Arc::new(State::new(configuration.alphabet()));
    let server = create_server(state, logger, configuration.max_body_size())
        .map_err(|error| Error::new(format!("Could not build routes: {}", error)))?;
    let address = SocketAddr::new(configuration.host(), configuration.port());

    logger.log(format!(
        "Listening on {} (threads {}, max body size {}, alphabet {})",
        address,
        configuration.threads(),
        configuration.max_body_size(),
        configuration.alphabet()
    ));
    runtime
        .block_on(server.run(address))
        .map_err(|error| Error::new(format!("Server error: {}", error)))
}

fn main() {
    let logger = Logger::new();
    let result = Configuration::from_env().and_then(|configuration| run(configuration, logger));
    if let Err(error) = result {
        eprintln!("{}", error);
        process::exit(1);
    }
}
