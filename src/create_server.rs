use crate::{
    base64::{self, Alphabet},
    error::Error,
    logger::Logger,
    server::{self, respond, respond_message, Server},
};
use hyper::{Body, Response, StatusCode};
use serde::Serialize;
use std::{collections::HashMap, sync::Arc};

macro_rules! unwrap {
    ( $x:expr ) => {{
        match $x {
            Ok(result) => result,
            Err(error) => return respond_error(error),
        }
    }};
}

pub struct State {
    alphabet: Alphabet,
}

impl State {
    pub fn new(alphabet: Alphabet) -> Self {
        Self { alphabet }
    }

    /// Alphabet used when a request does not name one.
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }
}

#[derive(Serialize)]
struct AlphabetDescription {
    name: &'static str,
    characters: String,
    padding: Option<String>,
}

impl AlphabetDescription {
    fn new(alphabet: Alphabet) -> Self {
        let charset = alphabet.charset();
        Self {
            name: alphabet.name(),
            characters: charset.characters().iter().copied().map(char::from).collect(),
            padding: charset.padding().map(|padding| char::from(padding).to_string()),
        }
    }
}

#[derive(Serialize)]
struct Encoded {
    alphabet: &'static str,
    padded: bool,
    text: String,
}

fn parse_alphabet(parameters: &HashMap<String, String>, state: &State) -> Result<Alphabet, Error> {
    match parameters.get("alphabet") {
        Some(alphabet) => Ok(alphabet.parse::<Alphabet>()?),
        None => Ok(state.alphabet()),
    }
}

fn parse_padding(parameters: &HashMap<String, String>) -> Result<bool, Error> {
    match parameters.get("padding").map(String::as_str) {
        None | Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(padding) => Err(Error::new(format!(r#"Invalid padding parameter "{}""#, padding))),
    }
}

fn respond_ok(value: &impl Serialize) -> Response<Body> {
    match serde_json::to_string(value) {
        Ok(json) => respond(StatusCode::OK, "application/json", json),
        Err(error) => respond_message(StatusCode::INTERNAL_SERVER_ERROR, error.to_string()),
    }
}

fn respond_error(error: Error) -> Response<Body> {
    respond_message(StatusCode::BAD_REQUEST, error.message())
}

fn encode(body: &[u8], parameters: &HashMap<String, String>, state: &State) -> Response<Body> {
    let alphabet = unwrap!(parse_alphabet(parameters, state));
    let padded = unwrap!(parse_padding(parameters));
    let text = if padded {
        base64::encode(body, alphabet)
    } else {
        base64::encode_unpadded(body, alphabet)
    };
    respond_ok(&Encoded {
        alphabet: alphabet.name(),
        padded,
        text,
    })
}

fn decode(text: &[u8], parameters: &HashMap<String, String>, state: &State) -> Response<Body> {
    let alphabet = unwrap!(parse_alphabet(parameters, state));
    let bytes = unwrap!(base64::decode(text, alphabet).map_err(Error::from));
    respond(StatusCode::OK, "application/octet-stream", bytes)
}

pub fn create_server(state: Arc<State>, logger: Logger, max_body_size: usize) -> Result<Server<State>, server::Error> {
    let mut server = Server::new(state, logger, max_body_size);

    server.get("/alphabets", |_request, _parameters, _body, _state| async move {
        respond_ok(&Alphabet::ALL.map(AlphabetDescription::new))
    })?;

    server.post("/encode", |_request, parameters, body, state| async move {
        encode(&body, &parameters, &state)
    })?;

    server.post("/decode", |_request, parameters, body, state| async move {
        decode(&body, &parameters, &state)
    })?;

    server.get("/decode/{text}", |_request, parameters, _body, state| async move {
        let text = parameters.get("text").cloned().unwrap_or_default();
        decode(text.as_bytes(), &parameters, &state)
    })?;

    server.default(|request, _body, _state| async move {
        respond_message(
            StatusCode::NOT_FOUND,
            format!("No route for {} {}", request.method(), request.uri().path()),
        )
    });

    Ok(server)
}
