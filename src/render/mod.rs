//! HTML rendering for the listing and episode pages
//!
//! Templates are compiled into the binary. Tera autoescaping is on for every
//! template; the episode description is the one value emitted with `safe`,
//! because the API delivers it as HTML.

use tera::{Context, Tera};
use thiserror::Error;

use crate::episodes::Episode;
use crate::humanize::Locale;
use crate::pages::ListingProps;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("templates/base.html")),
    ("index.html", include_str!("templates/index.html")),
    ("episode.html", include_str!("templates/episode.html")),
    ("loading.html", include_str!("templates/loading.html")),
];

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

/// Labels that depend on the display locale
#[derive(Debug)]
struct Labels {
    lang: &'static str,
    back_label: &'static str,
    play_label: &'static str,
    loading: &'static str,
}

impl Labels {
    fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::PtBr => Labels {
                lang: locale.tag(),
                back_label: "Voltar",
                play_label: "Tocar episódio",
                loading: "Carregando...",
            },
            Locale::EnUs => Labels {
                lang: locale.tag(),
                back_label: "Back",
                play_label: "Play episode",
                loading: "Loading...",
            },
        }
    }
}

pub struct Renderer {
    tera: Tera,
    locale: Locale,
}

impl Renderer {
    pub fn new(locale: Locale) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.to_vec())?;
        Ok(Self { tera, locale })
    }

    fn base_context(&self) -> Context {
        let labels = Labels::for_locale(self.locale);
        let mut context = Context::new();
        context.insert("lang", labels.lang);
        context.insert("back_label", labels.back_label);
        context.insert("play_label", labels.play_label);
        context
    }

    /// Render the listing page
    pub fn render_listing(&self, props: &ListingProps) -> Result<String, RenderError> {
        let mut context = self.base_context();
        context.insert("episodes", &props.episodes);
        Ok(self.tera.render("index.html", &context)?)
    }

    /// Render an episode detail page
    pub fn render_episode(&self, episode: &Episode) -> Result<String, RenderError> {
        let mut context = self.base_context();
        context.insert("episode", episode);
        Ok(self.tera.render("episode.html", &context)?)
    }

    /// Placeholder served while a detail page is still being generated
    pub fn render_loading(&self) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("text", Labels::for_locale(self.locale).loading);
        Ok(self.tera.render("loading.html", &context)?)
    }
}
