//! The HTTP client: explicit registration, transport, retry and cookie wiring.
//!
//! A [`Client`] is obtained from [`ClientBuilder`] — callers construct a named
//! descriptor (base URL, timeouts, retry policy, cookie jar, codec overrides)
//! and get a call-dispatch object back. There is no scanning and no global
//! registry; everything the client uses is handed to it at build time.
//!
//! ## Retry policy
//! Only transport failures are retried, with the configured fixed attempt
//! count and fixed backoff interval; the last failure surfaces unchanged.
//! Codec failures are programmer/configuration errors and surface on the
//! first attempt.

use http::header::COOKIE;
use http::{HeaderValue, Method};

use crate::codec::{AutoDecoder, AutoEncoder, Decodable, Decoder, Encodable, Encoder};
use crate::config::{ClientConfig, RetryConfig};
use crate::cookies::CookieJarHandle;
use crate::errors::ClientError;
use crate::request::RequestTemplate;
use crate::response::Response;

/// A configured HTTP client bound to one base URL.
///
/// Codec overrides are type parameters: substituting an encoder or decoder
/// swaps the whole dispatch, not an entry in a shared registry.
pub struct Client<E = AutoEncoder, D = AutoDecoder> {
    name: String,
    config: ClientConfig,
    http: reqwest::Client,
    encoder: E,
    decoder: D,
    jar: Option<CookieJarHandle>,
}

/// Builder for [`Client`]; the explicit registration API.
pub struct ClientBuilder<E = AutoEncoder, D = AutoDecoder> {
    name: String,
    config: ClientConfig,
    encoder: E,
    decoder: D,
    jar: Option<CookieJarHandle>,
}

impl Client {
    /// Starts a builder for a named client targeting `base_url`.
    pub fn builder(name: impl Into<String>, base_url: url::Url) -> ClientBuilder {
        ClientBuilder {
            name: name.into(),
            config: ClientConfig::new(base_url),
            encoder: AutoEncoder::new(),
            decoder: AutoDecoder::new(),
            jar: None,
        }
    }
}

impl<E, D> ClientBuilder<E, D> {
    pub fn connect_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn read_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config.read_timeout = timeout;
        self
    }

    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    /// Enables automatic cookie handling backed by `jar`: response cookies
    /// are saved, matching cookies attached to every outgoing request.
    pub fn auto_cookies(mut self, jar: CookieJarHandle) -> Self {
        self.config.auto_cookies = true;
        self.jar = Some(jar);
        self
    }

    /// Substitutes the encoder.
    pub fn encoder<E2: Encoder>(self, encoder: E2) -> ClientBuilder<E2, D> {
        ClientBuilder {
            name: self.name,
            config: self.config,
            encoder,
            decoder: self.decoder,
            jar: self.jar,
        }
    }

    /// Substitutes the decoder.
    pub fn decoder<D2: Decoder>(self, decoder: D2) -> ClientBuilder<E, D2> {
        ClientBuilder {
            name: self.name,
            config: self.config,
            encoder: self.encoder,
            decoder,
            jar: self.jar,
        }
    }

    /// Builds the client, constructing the underlying transport once.
    pub fn build(self) -> Result<Client<E, D>, ClientError> {
        let http = reqwest::Client::builder()
            .connect_timeout(self.config.connect_timeout)
            .timeout(self.config.read_timeout)
            .build()?;

        Ok(Client {
            name: self.name,
            config: self.config,
            http,
            encoder: self.encoder,
            decoder: self.decoder,
            jar: self.jar,
        })
    }
}

impl<E: Encoder, D: Decoder> Client<E, D> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Starts a request for `path` resolved against the base URL.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestTemplate, ClientError> {
        let url = self.config.base_url.join(path)?;
        Ok(RequestTemplate::new(method, url))
    }

    /// Full round trip: encode the body (if any), send with retry, decode
    /// the response into the declared return type.
    pub async fn call<B, T>(
        &self,
        mut template: RequestTemplate,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        B: Encodable + ?Sized,
        T: Decodable,
    {
        if let Some(body) = body {
            self.encoder.encode(body, &mut template)?;
        }
        let response = self.send(template).await?;
        Ok(self.decoder.decode(response)?)
    }

    /// Bodyless round trip; decodes straight into the declared return type.
    pub async fn fetch<T: Decodable>(&self, template: RequestTemplate) -> Result<T, ClientError> {
        let response = self.send(template).await?;
        Ok(self.decoder.decode(response)?)
    }

    /// Sends an already-encoded request, applying cookies and the retry policy.
    pub async fn send(&self, mut template: RequestTemplate) -> Result<Response, ClientError> {
        if self.config.auto_cookies {
            self.attach_cookies(&mut template);
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            log::debug!(
                "[{}] {} {} (attempt {}/{})",
                self.name,
                template.method,
                template.url,
                attempt,
                self.config.retry.max_attempts
            );

            match self.dispatch(&template).await {
                Ok(response) => {
                    log::trace!(
                        "[{}] {} {} -> {} {} ({} bytes)",
                        self.name,
                        template.method,
                        template.url,
                        response.status,
                        response.status_text,
                        response.body.len()
                    );
                    if self.config.auto_cookies {
                        if let Some(jar) = &self.jar {
                            jar.save_from_headers(&response.url, &response.headers);
                        }
                    }
                    return Ok(response);
                }
                Err(err) if attempt < self.config.retry.max_attempts => {
                    log::warn!(
                        "[{}] transport error: {err}; retrying in {:?}",
                        self.name,
                        self.config.retry.backoff
                    );
                    tokio::time::sleep(self.config.retry.backoff).await;
                }
                Err(err) => return Err(ClientError::Transport(err)),
            }
        }
    }

    fn attach_cookies(&self, template: &mut RequestTemplate) {
        let Some(jar) = &self.jar else { return };
        if let Some(header) = jar.request_header(&template.url) {
            if let Ok(value) = HeaderValue::from_str(&header) {
                template.headers.insert(COOKIE, value);
            }
        }
    }

    async fn dispatch(&self, template: &RequestTemplate) -> Result<Response, reqwest::Error> {
        let mut request = self
            .http
            .request(template.method.clone(), template.url.clone())
            .headers(template.headers.clone());
        if let Some(body) = &template.body {
            request = request.body(body.clone());
        }

        let res = request.send().await?;
        Response::buffer(res).await
    }
}
