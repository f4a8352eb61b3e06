use crate::{error, logger::Logger};
use hyper::{
    body::HttpBody,
    header::{HeaderValue, CONTENT_TYPE},
    service::{make_service_fn, service_fn},
    Body, Method, Request, Response, StatusCode,
};
use regex::Regex;
use serde_json::json;
use std::{collections::HashMap, convert::Infallible, fmt, future::Future, net::SocketAddr, pin::Pin, sync::Arc};

/// Failure to register a route.
#[derive(Debug)]
pub enum Error {
    InvalidPattern(regex::Error),
    DuplicateParameter { name: String, uri: String },
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidPattern(error) => write!(f, "Invalid route pattern: {}", error),
            Self::DuplicateParameter { name, uri } => write!(f, "Duplicate parameter {} in {}", name, uri),
        }
    }
}

impl From<regex::Error> for Error {
    fn from(error: regex::Error) -> Self {
        Self::InvalidPattern(error)
    }
}

/// Path template where every `{name}` segment captures one path segment into the parameter `name`.
pub struct DynamicUri {
    regex: Regex,
    parameters: HashMap<String, usize>,
}

impl DynamicUri {
    pub fn new(uri: &str) -> Result<Self, Error> {
        let placeholder = Regex::new(r"\{([^\{]*)\}")?;
        let mut offset = 0;
        let mut index = 1;
        let mut chunks = Vec::new();
        let mut parameters = HashMap::new();
        for occurence in placeholder.find_iter(uri) {
            let range = occurence.range();
            let name = &uri[range.start + 1..range.end - 1];
            if parameters.contains_key(name) {
                return Err(Error::DuplicateParameter {
                    name: name.to_string(),
                    uri: uri.to_string(),
                });
            }
            parameters.insert(name.to_string(), index);
            chunks.push(regex::escape(&uri[offset..range.start]));
            chunks.push(String::from("([^/]*)"));
            offset = range.end;
            index += 1;
        }
        chunks.push(regex::escape(&uri[offset..]));
        let regex = Regex::new(&format!("^{}$", chunks.join("")))?;
        Ok(Self { regex, parameters })
    }

    pub fn check(&self, uri: &str) -> Option<HashMap<String, String>> {
        let captures = self.regex.captures(uri)?;
        let mut parameters = HashMap::new();
        for (name, &index) in &self.parameters {
            parameters.insert(name.clone(), captures[index].to_string());
        }
        Some(parameters)
    }
}

type BoxedResponseFuture = Pin<Box<dyn Send + Future<Output = Response<Body>>>>;
type BoxedHandler<S> = Box<dyn Fn(Request<Body>, HashMap<String, String>, Vec<u8>, Arc<S>) -> BoxedResponseFuture + Send + Sync>;
type BoxedDefaultHandler<S> = Box<dyn Fn(Request<Body>, Vec<u8>, Arc<S>) -> BoxedResponseFuture + Send + Sync>;

struct Route<S> {
    method: Method,
    dynamic_uri: DynamicUri,
    handler: BoxedHandler<S>,
}

impl<S> Route<S> {
    fn check(&self, request: &Request<Body>) -> Option<HashMap<String, String>> {
        if request.method() == self.method {
            self.dynamic_uri.check(request.uri().path())
        } else {
            None
        }
    }
}

pub fn respond(status: StatusCode, content_type: &'static str, body: impl Into<Body>) -> Response<Body> {
    let mut response = Response::new(body.into());
    *response.status_mut() = status;
    response.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

pub fn respond_json(status: StatusCode, value: serde_json::Value) -> Response<Body> {
    respond(status, "application/json", value.to_string())
}

pub fn respond_message(status: StatusCode, message: impl Into<String>) -> Response<Body> {
    respond_json(status, json!({ "message": message.into() }))
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

/// Resolves `%XX` escapes. `+` is kept as is since it is a base64 symbol, not a space.
pub fn percent_decode(text: &str) -> Result<String, error::Error> {
    let input = text.as_bytes();
    let mut output = Vec::with_capacity(input.len());
    let mut index = 0;
    while index < input.len() {
        if input[index] == b'%' {
            let high = input.get(index + 1).copied().and_then(hex_value);
            let low = input.get(index + 2).copied().and_then(hex_value);
            match (high, low) {
                (Some(high), Some(low)) => output.push((high << 4) | low),
                _ => return Err(error::Error::new(format!(r#"Invalid escape at index {} in "{}""#, index, text))),
            }
            index += 3;
        } else {
            output.push(input[index]);
            index += 1;
        }
    }
    String::from_utf8(output).map_err(|_| error::Error::new(format!(r#"Invalid utf8 in "{}""#, text)))
}

fn decode_parameters(parameters: HashMap<String, String>) -> Result<HashMap<String, String>, error::Error> {
    parameters
        .into_iter()
        .map(|(name, value)| Ok((name, percent_decode(&value)?)))
        .collect()
}

fn parse_query(query: &str, parameters: &mut HashMap<String, String>) {
    for part in query.split('&') {
        let parts: Vec<&str> = part.split('=').collect();
        if parts.len() == 2 {
            parameters.insert(parts[0].to_string(), parts[1].to_string());
        }
    }
}

pub struct Router<S> {
    default: Option<BoxedDefaultHandler<S>>,
    routes: Vec<Route<S>>,
    state: Arc<S>,
    logger: Logger,
    max_body_size: usize,
}

impl<S> Router<S> {
    pub fn new(state: Arc<S>, logger: Logger, max_body_size: usize) -> Self {
        Self {
            default: None,
            routes: Vec::new(),
            state,
            logger,
            max_body_size,
        }
    }

    fn add<H, F>(&mut self, method: Method, uri: &str, handler: H) -> Result<(), Error>
    where
        H: 'static + Fn(Request<Body>, HashMap<String, String>, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.routes.push(Route {
            method,
            dynamic_uri: DynamicUri::new(uri)?,
            handler: Box::new(move |request, parameters, body, state| Box::pin(handler(request, parameters, body, state))),
        });
        Ok(())
    }

    pub fn get<H, F>(&mut self, uri: &str, handler: H) -> Result<(), Error>
    where
        H: 'static + Fn(Request<Body>, HashMap<String, String>, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.add(Method::GET, uri, handler)
    }

    pub fn post<H, F>(&mut self, uri: &str, handler: H) -> Result<(), Error>
    where
        H: 'static + Fn(Request<Body>, HashMap<String, String>, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.add(Method::POST, uri, handler)
    }

    pub fn default<H, F>(&mut self, handler: H)
    where
        H: 'static + Fn(Request<Body>, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.default = Some(Box::new(move |request, body, state| Box::pin(handler(request, body, state))));
    }

    pub async fn route(&self, request: Request<Body>, body: Vec<u8>) -> Response<Body> {
        for route in &self.routes {
            if let Some(mut parameters) = route.check(&request) {
                if let Some(query) = request.uri().query() {
                    parse_query(query, &mut parameters);
                }
                let parameters = match decode_parameters(parameters) {
                    Ok(parameters) => parameters,
                    Err(error) => return respond_message(StatusCode::BAD_REQUEST, error.message()),
                };
                return (route.handler)(request, parameters, body, self.state.clone()).await;
            }
        }
        match &self.default {
            Some(default) => default(request, body, self.state.clone()).await,
            None => respond_message(StatusCode::NOT_FOUND, "Not Found"),
        }
    }

    /// Collects the request body, refusing bodies larger than the configured limit, then routes the request.
    pub async fn handle(&self, mut request: Request<Body>) -> Response<Body> {
        let description = format!("{} {}", request.method(), request.uri());
        let mut body: Vec<u8> = Vec::new();
        let mut refusal = None;
        while let Some(chunk) = request.body_mut().data().await {
            match chunk {
                Ok(chunk) if body.len() + chunk.len() <= self.max_body_size => body.extend_from_slice(&chunk),
                Ok(_) => {
                    refusal = Some(respond_message(
                        StatusCode::PAYLOAD_TOO_LARGE,
                        format!("Body exceeds {} bytes", self.max_body_size),
                    ));
                    break;
                }
                Err(error) => {
                    refusal = Some(respond_message(StatusCode::BAD_REQUEST, format!("Could not read body: {}", error)));
                    break;
                }
            }
        }
        let response = match refusal {
            Some(response) => response,
            None => self.route(request, body).await,
        };
        self.logger.log(format!("{} {}", description, response.status().as_u16()));
        response
    }
}

pub struct Server<S> {
    router: Router<S>,
}

impl<S: 'static + Send + Sync> Server<S> {
    pub fn new(state: Arc<S>, logger: Logger, max_body_size: usize) -> Self {
        Self {
            router: Router::new(state, logger, max_body_size),
        }
    }

    pub fn get<H, F>(&mut self, uri: &str, handler: H) -> Result<(), Error>
    where
        H: 'static + Fn(Request<Body>, HashMap<String, String>, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.router.get(uri, handler)
    }

    pub fn post<H, F>(&mut self, uri: &str, handler: H) -> Result<(), Error>
    where
        H: 'static + Fn(Request<Body>, HashMap<String, String>, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.router.post(uri, handler)
    }

    pub fn default<H, F>(&mut self, handler: H)
    where
        H: 'static + Fn(Request<Body>, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.router.default(handler);
    }

    pub fn router(&self) -> &Router<S> {
        &self.router
    }

    pub async fn run(self, address: SocketAddr) -> Result<(), hyper::Error> {
        let router = Arc::new(self.router);
        let make_service = make_service_fn(|_| {
            let router = router.clone();
            async {
                Ok::<_, Infallible>(service_fn(move |request: Request<Body>| {
                    let router = router.clone();
                    async move { Ok::<_, Infallible>(router.handle(request).await) }
                }))
            }
        });
        hyper::Server::try_bind(&address)?.serve(make_service).await
    }
}
