//! Generation endpoints.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, info, instrument, warn};

use cantus_core::error::InvalidInputError;
use cantus_core::poll::wait_for;
use cantus_core::reflow::reflow_lyrics;
use cantus_core::types::{CreatedClips, LyricsJob};
use cantus_core::{
    Clip, Cookie, ExtendClipPayload, GenerateClipPayload, GenerateLyricsPayload, Lyrics,
    PollOptions, Result,
};

use crate::clerk::ClerkSession;
use crate::config::ClientConfig;
use crate::endpoints::{self, ClipList, ConcatRequest, FeedQuery, SingleClip};
use crate::transport::{ReqwestSender, Transport, transport_error};
use crate::user_agent::random_chrome_user_agent;

/// Client for the generation service.
///
/// Create calls return once the job is settled (or the poll times out),
/// unless the [`PollOptions`] passed in say not to wait. The session is
/// established lazily: the first request goes out without a token, the
/// service answers 401, and the client authenticates and replays it. Call
/// [`GenerationClient::authenticate`] to do that up front instead.
///
/// # Example
///
/// ```no_run
/// use cantus_core::{Cookie, GenerateClipPayload, PollOptions};
/// use cantus_http::GenerationClient;
///
/// # async fn example() -> Result<(), cantus_core::Error> {
/// let client = GenerationClient::new(Cookie::new("__client=..."))?;
/// let clips = client
///     .generate_clips(
///         &GenerateClipPayload::new("a calm piano piece for rainy days"),
///         &PollOptions::for_clips(),
///     )
///     .await?;
///
/// for clip in clips {
///     println!("{} {} {:?}", clip.id, clip.status, clip.audio_url);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GenerationClient {
    transport: Transport,
    config: Arc<ClientConfig>,
    user_agent: String,
}

impl GenerationClient {
    /// Create a client with the default configuration.
    pub fn new(cookie: Cookie) -> Result<Self> {
        Self::with_config(cookie, ClientConfig::default())
    }

    /// Create a client with a custom configuration.
    pub fn with_config(cookie: Cookie, config: ClientConfig) -> Result<Self> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(random_chrome_user_agent);

        let http = reqwest::Client::builder()
            .user_agent(user_agent.as_str())
            .timeout(config.request_timeout)
            .build()
            .map_err(transport_error)?;

        let session = Arc::new(ClerkSession::new(http.clone(), &cookie, &config)?);
        let sender = Arc::new(ReqwestSender::new(http, config.api_base_url.clone()));

        Ok(Self {
            transport: Transport::new(sender, session),
            config: Arc::new(config),
            user_agent,
        })
    }

    /// Build a client over an existing transport.
    pub fn from_transport(transport: Transport, config: ClientConfig) -> Self {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(random_chrome_user_agent);
        Self {
            transport,
            config: Arc::new(config),
            user_agent,
        }
    }

    /// The user agent this client sends.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Establish a session now rather than on the first 401.
    pub async fn authenticate(&self) -> Result<()> {
        self.transport.authenticator().authenticate().await
    }

    /// Create a batch of clips and wait for them per `options`.
    #[instrument(skip(self, payload, options), fields(custom = payload.is_custom()))]
    pub async fn generate_clips(
        &self,
        payload: &GenerateClipPayload,
        options: &PollOptions,
    ) -> Result<Vec<Clip>> {
        info!("Creating clips");

        let body = self.creation_body(payload)?;
        let created: CreatedClips = self.transport.post(endpoints::GENERATE, &body).await?;
        // An empty id list would widen the feed query to the whole account.
        if created.clips.is_empty() {
            warn!("Service created no clips, nothing to wait for");
            return Ok(created.clips);
        }
        let ids: Vec<String> = created.clips.iter().map(|c| c.id.clone()).collect();
        debug!(ids = %ids.join(","), "Clips created");

        let ids = ids.as_slice();
        wait_for(options, created.clips, move || self.get_feed(ids)).await
    }

    /// Extend an existing clip and wait for the continuation per `options`.
    #[instrument(skip(self, payload, options), fields(clip = %payload.continue_clip_id))]
    pub async fn extend_clip(
        &self,
        payload: &ExtendClipPayload,
        options: &PollOptions,
    ) -> Result<Clip> {
        info!("Extending clip");

        let reply: SingleClip = self.transport.post(endpoints::GENERATE, payload).await?;
        let clip = first_clip(reply)?;
        let id = clip.id.clone();
        debug!(id = %id, "Extension created");

        let id = id.as_str();
        wait_for(options, clip, move || self.get_clip(id)).await
    }

    /// Stitch an extended clip into the whole song.
    #[instrument(skip(self))]
    pub async fn concatenate(&self, clip_id: &str) -> Result<Clip> {
        info!("Concatenating clip");
        let reply: SingleClip = self
            .transport
            .post(endpoints::CONCAT, &ConcatRequest { clip_id })
            .await?;
        first_clip(reply)
    }

    /// Start a lyrics job and wait for it per `options`.
    ///
    /// Without waiting, the returned record is a placeholder carrying the
    /// job id and an error status.
    #[instrument(skip(self, payload, options))]
    pub async fn generate_lyrics(
        &self,
        payload: &GenerateLyricsPayload,
        options: &PollOptions,
    ) -> Result<Lyrics> {
        info!("Generating lyrics");

        let job: LyricsJob = self
            .transport
            .post(endpoints::GENERATE_LYRICS, payload)
            .await?;
        debug!(id = %job.id, "Lyrics job created");

        let seed = Lyrics::placeholder(job.id.as_str());
        let id = job.id.as_str();
        wait_for(options, seed, move || self.get_lyrics(id)).await
    }

    /// Fetch a lyrics job, with blank lines removed from its text.
    #[instrument(skip(self))]
    pub async fn get_lyrics(&self, id: &str) -> Result<Lyrics> {
        let mut lyrics: Lyrics = self.transport.get(&endpoints::lyrics(id), None).await?;
        lyrics.id = id.to_string();
        lyrics.text = reflow_lyrics(&lyrics.text);
        Ok(lyrics)
    }

    /// Fetch clips from the feed; an empty `ids` returns the whole feed.
    #[instrument(skip(self), fields(count = ids.len()))]
    pub async fn get_feed(&self, ids: &[String]) -> Result<Vec<Clip>> {
        let query = FeedQuery {
            ids: (!ids.is_empty()).then(|| ids.join(",")),
        };
        let list: ClipList = self
            .transport
            .get(endpoints::FEED, Some(serde_json::to_value(&query)?))
            .await?;
        Ok(list.into_clips())
    }

    /// Fetch a single clip.
    #[instrument(skip(self))]
    pub async fn get_clip(&self, id: &str) -> Result<Clip> {
        self.transport.get(&endpoints::clip(id), None).await
    }

    /// Fetch credits and plan information, as returned.
    #[instrument(skip(self))]
    pub async fn get_billing_info(&self) -> Result<Value> {
        self.transport.get(endpoints::BILLING_INFO, None).await
    }

    /// Merge the create defaults under the caller's payload.
    fn creation_body(&self, payload: &GenerateClipPayload) -> Result<Value> {
        let mut body = json!({
            "mv": self.config.default_model,
            "makeInstrumental": false,
        });

        if let (Value::Object(base), Value::Object(overrides)) =
            (&mut body, serde_json::to_value(payload)?)
        {
            base.extend(overrides);
            if !payload.is_custom() {
                base.insert(
                    "gptDescriptionPrompt".to_string(),
                    Value::String(payload.prompt.clone()),
                );
            }
        }

        Ok(body)
    }
}

fn first_clip(reply: SingleClip) -> Result<Clip> {
    match reply {
        SingleClip::Bare(clip) => Ok(*clip),
        SingleClip::Wrapped { clips } => clips.into_iter().next().ok_or_else(|| {
            InvalidInputError::Other {
                message: "service returned no clips".to_string(),
            }
            .into()
        }),
    }
}

impl std::fmt::Debug for GenerationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationClient")
            .field("api", &self.config.api_base_url)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}
