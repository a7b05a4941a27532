//! The interactive session: one retained page, one hit registry, one loop.
//!
//! State changes that affect content regenerate the page wholesale via the
//! compositor and carry the transient view state across; the hit registry
//! is cleared and rebound every frame so stale regions cannot exist.

pub mod binder;
pub mod draw;
pub mod gesture;
pub mod registry;
pub mod scrollspy;
pub mod view_state;

use std::io::Write as _;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context as TaskContext, Poll};
use std::time::{Duration, Instant};

use anyhow::Result;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use futures::Future;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use serde_json::json;
use tokio::sync::mpsc;

use crate::bus::{self, EventBus};
use crate::contact::validate::{self, FieldErrors};
use crate::contact::{
    Controller, DispatchFuture, FormPhase, NoticeKind, Rejection, Submission,
};
use crate::content::{
    SectionId, DRAG_UNITS_PER_ROW, NAV_SECTIONS, NOTICE_LIFETIME, PROFILE, TITLE_ROTATE_PERIOD,
    TOAST_LIFETIME,
};
use crate::i18n::Translator;
use crate::prefs::Preferences;
use crate::services::verify::BotVerifier;
use crate::theme::ThemeHandle;
use crate::ui::compositor::{compose, ComposeFlags};
use crate::ui::page::{ActiveDropdown, FieldErrorTexts, FormFieldId, Page, Slot};
use crate::ui::sections::CertItem;
use crate::ui::Action;

use binder::{bind, Layout, ModalContent};
use gesture::{GestureOutcome, SheetGesture};
use registry::HitRegistry;
use view_state::ViewState;

/// Cross-thread notifications from bus subscribers back into the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMsg {
    LocaleChanged,
    ThemeChanged,
}

pub struct Session {
    t: Arc<Translator>,
    prefs: Arc<Preferences>,
    bus: Arc<EventBus>,
    theme: Arc<ThemeHandle>,
    contact: Controller,
    verifier: Option<Arc<dyn BotVerifier>>,

    page: Page,
    layout: Layout,
    registry: HitRegistry,
    gesture: SheetGesture,
    /// Open certification modal, as an index into the catalog records.
    modal: Option<usize>,
    toasts: Vec<(String, Instant)>,

    titles: Vec<String>,
    title_index: usize,
    title_tick: Instant,
    hints: String,
    scroll_top_label: String,

    pending_submit: Option<DispatchFuture>,
    pending_warm: Option<Pin<Box<dyn Future<Output = ()> + Send>>>,
    warmed: bool,

    msg_tx: mpsc::UnboundedSender<SessionMsg>,
    msg_rx: mpsc::UnboundedReceiver<SessionMsg>,
    bootstrapped: bool,
    should_quit: bool,
    area: Rect,
}

impl Session {
    pub fn new(
        t: Arc<Translator>,
        prefs: Arc<Preferences>,
        bus: Arc<EventBus>,
        theme: Arc<ThemeHandle>,
        contact: Controller,
        verifier: Option<Arc<dyn BotVerifier>>,
        area: Rect,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let flags = ComposeFlags {
            viewport_width: area.width,
            title_index: 0,
            mail_available: contact.available(),
        };
        let page = compose(&t, &PROFILE, &flags);
        let scroll_top_label = t.t("status.top");
        let layout = Layout::compute(&page, area, None, 0, &scroll_top_label);

        Self {
            titles: t.t_list("hero.titles"),
            hints: t.t("status.hints"),
            scroll_top_label,
            t,
            prefs,
            bus,
            theme,
            contact,
            verifier,
            page,
            layout,
            registry: HitRegistry::new(),
            gesture: SheetGesture::default(),
            modal: None,
            toasts: Vec::new(),
            title_index: 0,
            title_tick: Instant::now(),
            pending_submit: None,
            pending_warm: None,
            warmed: false,
            msg_tx,
            msg_rx,
            bootstrapped: false,
            should_quit: false,
            area,
        }
    }

    /// Wire the bus subscribers. Later calls are no-ops, so subscribers
    /// never stack no matter how often startup paths run.
    pub fn bootstrap(&mut self) {
        if self.bootstrapped {
            log::debug!("bootstrap: subscribers already wired");
            return;
        }
        let tx = self.msg_tx.clone();
        self.bus.subscribe(bus::LANGUAGE_CHANGED, move |payload| {
            log::info!("language changed: {}", payload);
            let _ = tx.send(SessionMsg::LocaleChanged);
        });
        let tx = self.msg_tx.clone();
        self.bus.subscribe(bus::THEME_CHANGED, move |payload| {
            log::debug!("theme changed: {}", payload);
            let _ = tx.send(SessionMsg::ThemeChanged);
        });
        self.bus.subscribe(bus::CONTACT_FORM_SUBMITTED, |payload| {
            log::info!("contact form submitted: {}", payload);
        });
        self.bootstrapped = true;
    }

    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.bootstrap();

        loop {
            let frame_start = Instant::now();

            // Drain all pending input first for minimal latency.
            while event::poll(Duration::from_millis(0))? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(width, height) => self.handle_resize(width, height),
                    _ => {}
                }
            }
            if self.should_quit {
                break;
            }

            self.drain_messages();
            self.poll_async();
            self.tick(frame_start);

            terminal.draw(|frame| self.render(frame))?;

            // Sleep out the rest of the 16ms frame (60 FPS)
            let elapsed = frame_start.elapsed();
            if let Some(remaining) = Duration::from_millis(16).checked_sub(elapsed) {
                tokio::time::sleep(remaining).await;
            }
        }
        Ok(())
    }

    fn body_height(&self) -> u16 {
        self.area.height.saturating_sub(3)
    }

    /// Regenerate the whole page from the active catalog and carry the
    /// transient view state across.
    fn rebuild(&mut self) {
        let state = ViewState::capture(&self.page);
        let flags = ComposeFlags {
            viewport_width: self.area.width,
            title_index: self.title_index,
            mail_available: self.contact.available(),
        };
        let mut page = compose(&self.t, &PROFILE, &flags);
        state.restore(&mut page);
        page.clamp_scroll(self.body_height());
        self.page = page;

        self.titles = self.t.t_list("hero.titles");
        self.hints = self.t.t("status.hints");
        self.scroll_top_label = self.t.t("status.top");
    }

    fn drain_messages(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            match msg {
                SessionMsg::LocaleChanged => self.rebuild(),
                // Palette already swapped; the next paint reads it.
                SessionMsg::ThemeChanged => {}
            }
        }
    }

    /// Poll in-flight futures without a real waker; the 16ms frame cadence
    /// is the wakeup.
    fn poll_async(&mut self) {
        let waker = futures::task::noop_waker();
        let mut cx = TaskContext::from_waker(&waker);

        if let Some(future) = self.pending_submit.as_mut() {
            if let Poll::Ready(result) = future.as_mut().poll(&mut cx) {
                self.pending_submit = None;
                self.finish_submit(result);
            }
        }
        if let Some(future) = self.pending_warm.as_mut() {
            if let Poll::Ready(()) = future.as_mut().poll(&mut cx) {
                self.pending_warm = None;
            }
        }
    }

    fn tick(&mut self, now: Instant) {
        if !self.titles.is_empty()
            && now.duration_since(self.title_tick) >= TITLE_ROTATE_PERIOD
        {
            self.title_index = (self.title_index + 1) % self.titles.len();
            self.title_tick = now;
        }

        self.toasts
            .retain(|(_, born)| now.duration_since(*born) < TOAST_LIFETIME);

        if let FormPhase::Notice {
            expires: Some(at), ..
        } = &self.page.form.phase
        {
            if now >= *at {
                self.page.form.phase = FormPhase::Idle;
            }
        }

        self.maybe_warm();
    }

    /// Kick the verifier's lazy init once the contact section is within a
    /// viewport of scrolling on screen.
    fn maybe_warm(&mut self) {
        if self.warmed {
            return;
        }
        let Some(verifier) = self.verifier.clone() else {
            self.warmed = true;
            return;
        };
        let Some(anchor) = self.page.anchor(SectionId::Contact) else {
            return;
        };
        if self.page.scroll + self.body_height() * 2 >= anchor {
            self.warmed = true;
            self.pending_warm = Some(Box::pin(async move { verifier.warm().await }));
            log::debug!("verify: warming ahead of contact section");
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if area != self.area {
            self.area = area;
            self.rebuild();
        }

        let modal_content = self.modal_content();
        self.layout = Layout::compute(
            &self.page,
            area,
            modal_content.as_ref(),
            Layout::sheet_rows(self.gesture.offset()),
            &self.scroll_top_label,
        );
        bind(
            &mut self.registry,
            &self.page,
            &self.layout,
            self.contact.available(),
        );

        let theme = self.theme.current();
        let spy = scrollspy::active_section(
            self.page.scroll,
            self.layout.body.height,
            &self.page.sections,
        );
        let hero_title = self
            .titles
            .get(self.title_index % self.titles.len().max(1))
            .map(String::as_str);
        let toast = self.toasts.last().map(|(text, _)| text.as_str());

        let ctx = draw::FrameCtx {
            layout: &self.layout,
            theme: &theme.palette,
            mode: theme.mode,
            active_nav: spy,
            hero_title,
            hints: &self.hints,
            scroll_top_label: &self.scroll_top_label,
            modal: modal_content.as_ref(),
            toast,
            mail_available: self.contact.available(),
        };
        draw::draw(frame, &mut self.page, &ctx);
    }

    /// Resolve the open certification against the active catalog, every
    /// frame, so a language change relocalizes the modal in place.
    fn modal_content(&mut self) -> Option<ModalContent> {
        let index = self.modal?;
        let items: Vec<CertItem> = self.t.t_list("certifications.items");
        let Some(item) = items.get(index) else {
            log::warn!("modal: certification {} out of range, closing", index);
            self.modal = None;
            return None;
        };
        Some(ModalContent {
            title: self.t.t("modal.title"),
            name: item.name.clone(),
            issuer: format!("{}: {}", self.t.t("modal.issuer"), item.issuer),
            year: format!("{}: {}", self.t.t("modal.year"), item.year),
            asset: format!("{}: {}", self.t.t("modal.asset"), item.asset),
            hint: self.t.t("modal.hint"),
            close: self.t.t("modal.close"),
        })
    }

    fn handle_resize(&mut self, width: u16, height: u16) {
        self.area = Rect::new(0, 0, width, height);
        // System-mode palettes re-detect here, the closest terminal analog
        // to a scheme-change notification.
        self.theme.refresh();
        self.rebuild();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.modal.is_some() {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.modal = None,
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        if self.page.overlay_open() {
            self.handle_overlay_key(key);
            return;
        }

        if let Some(id) = self.page.form.focus {
            self.handle_field_key(id, key);
            return;
        }

        self.handle_global_key(key);
    }

    /// Overlays swallow scrolling; only dismissal and the toggles that own
    /// them stay live.
    fn handle_overlay_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.dismiss_topmost(),
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('t') => self.dispatch(Action::ToggleTheme),
            KeyCode::Char('l') => self.dispatch(Action::ToggleLangMenu),
            KeyCode::Char('m') => self.dispatch(Action::ToggleMenu),
            _ => {}
        }
    }

    fn handle_field_key(&mut self, id: FormFieldId, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return;
        }
        match key.code {
            KeyCode::Esc => self.page.form.focus = None,
            KeyCode::Tab => self.focus_field(id.next()),
            KeyCode::BackTab => self.focus_field(id.prev()),
            KeyCode::Enter => match id {
                FormFieldId::Message => self.dispatch(Action::Submit),
                _ => self.focus_field(id.next()),
            },
            code => {
                self.page.form.field_mut(id).handle_key(code, field_capacity(id));
            }
        }
    }

    fn handle_global_key(&mut self, key: KeyEvent) {
        let body_h = self.body_height();
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('t') => self.dispatch(Action::ToggleTheme),
            KeyCode::Char('l') => self.dispatch(Action::ToggleLangMenu),
            KeyCode::Char('m') => self.dispatch(Action::ToggleMenu),
            KeyCode::Char('g') | KeyCode::Home => self.page.scroll = 0,
            KeyCode::Char('G') | KeyCode::End => {
                self.page.scroll = self.page.max_scroll(body_h)
            }
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Down => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-(body_h as i32)),
            KeyCode::PageDown => self.scroll_by(body_h as i32),
            KeyCode::Tab => self.focus_field(FormFieldId::Name),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.dispatch(Action::Jump(NAV_SECTIONS[index]));
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_press(mouse.column, mouse.row)
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.gesture.dragging() {
                    self.gesture
                        .drag_to(mouse.row as u32 * DRAG_UNITS_PER_ROW);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.handle_release(mouse.column, mouse.row)
            }
            MouseEventKind::ScrollUp => {
                if !self.scroll_locked() {
                    self.scroll_by(-3);
                }
            }
            MouseEventKind::ScrollDown => {
                if !self.scroll_locked() {
                    self.scroll_by(3);
                }
            }
            _ => {}
        }
    }

    /// An open layer locks page scrolling underneath it.
    fn scroll_locked(&self) -> bool {
        self.page.overlay_open() || self.modal.is_some()
    }

    fn handle_press(&mut self, x: u16, y: u16) {
        // Sheet presses start a drag; selection happens on release.
        if self.page.dropdown == ActiveDropdown::Sheet {
            if binder::inside_topmost(&self.layout, x, y) {
                self.gesture.begin(y as u32 * DRAG_UNITS_PER_ROW);
            } else {
                self.page.dropdown = ActiveDropdown::None;
            }
            return;
        }

        match self.registry.action_at(x, y).cloned() {
            Some(action) => self.dispatch(action),
            None => {
                // A miss on an open layer is an outside click.
                if !binder::inside_topmost(&self.layout, x, y) {
                    self.dismiss_topmost();
                }
            }
        }
    }

    fn handle_release(&mut self, x: u16, y: u16) {
        let travelled = self.gesture.offset();
        match self.gesture.release() {
            Some(GestureOutcome::Dismiss) => {
                log::debug!("sheet: drag-dismissed after {} units", travelled);
                self.page.dropdown = ActiveDropdown::None;
            }
            Some(GestureOutcome::SnapBack) => {
                // A release without travel is a tap.
                if travelled == 0 {
                    if let Some(action) = self.registry.action_at(x, y).cloned() {
                        self.dispatch(action);
                    }
                }
            }
            None => {}
        }
    }

    /// Close the topmost layer only, Esc-like.
    fn dismiss_topmost(&mut self) {
        if self.modal.is_some() {
            self.modal = None;
        } else if self.page.dropdown != ActiveDropdown::None {
            self.page.dropdown = ActiveDropdown::None;
            self.gesture.cancel();
        } else if self.page.menu_open {
            self.page.menu_open = false;
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        let max = self.page.max_scroll(self.body_height()) as i32;
        self.page.scroll = (self.page.scroll as i32 + delta).clamp(0, max) as u16;
    }

    fn focus_field(&mut self, id: FormFieldId) {
        self.page.form.focus = Some(id);
        self.ensure_slot_visible(Slot::Field(id));
    }

    /// Scroll just enough to bring a slot row into the body viewport.
    fn ensure_slot_visible(&mut self, slot: Slot) {
        let Some(row) = self.page.slot_line(slot) else {
            return;
        };
        let body_h = self.body_height();
        if row < self.page.scroll {
            self.page.scroll = row;
        } else if row >= self.page.scroll + body_h {
            self.page.scroll = row.saturating_sub(body_h.saturating_sub(1));
        }
    }

    fn toast(&mut self, text: String) {
        self.toasts.push((text, Instant::now()));
    }

    /// The one routing table: every interactive element funnels through
    /// here, whatever fired it.
    fn dispatch(&mut self, action: Action) {
        log::debug!("dispatch: {:?}", action);
        match action {
            Action::ToggleTheme => {
                let mode = self.theme.cycle(&self.prefs, &self.bus);
                self.toast(self.t.t(mode.label_key()));
                log::info!("theme mode now {}", mode.code());
            }
            Action::ToggleLangMenu => {
                if self.page.dropdown != ActiveDropdown::None {
                    self.page.dropdown = ActiveDropdown::None;
                    self.gesture.cancel();
                } else {
                    self.page.dropdown = if self.page.compact {
                        ActiveDropdown::Sheet
                    } else {
                        ActiveDropdown::HeaderLang
                    };
                    self.page.menu_open = false;
                }
            }
            Action::SelectLanguage(locale) => {
                self.page.dropdown = ActiveDropdown::None;
                self.gesture.cancel();
                let previous = self.t.active();
                self.t.change_locale(locale, &self.prefs, &self.bus);
                if locale != previous {
                    let label = ("language", locale.label().to_string());
                    self.toast(self.t.t_args("language.changed", &[label]));
                }
            }
            Action::ToggleMenu => {
                if self.page.compact {
                    self.page.menu_open = !self.page.menu_open;
                    self.page.dropdown = ActiveDropdown::None;
                }
            }
            Action::Jump(id) => {
                self.page.menu_open = false;
                self.page.dropdown = ActiveDropdown::None;
                if let Some(anchor) = self.page.anchor(id) {
                    self.page.scroll = anchor.min(self.page.max_scroll(self.body_height()));
                    log::debug!("jump to {} (row {})", id.anchor(), anchor);
                }
            }
            Action::ScrollTop => self.page.scroll = 0,
            Action::OpenModal(index) => self.modal = Some(index),
            Action::CloseModal => self.modal = None,
            Action::OpenEmail => self.open_email(),
            Action::CopyEmail => self.copy_email(),
            Action::OpenLink(url) => {
                log::info!("open link: {}", url);
                self.toast(url);
            }
            Action::FocusField(id) => self.focus_field(id),
            Action::Submit => self.submit(),
        }
    }

    /// Compose a mailto link. Nothing here may spawn a browser, so the
    /// link lands in the log and the toast says the address is ready.
    fn open_email(&mut self) {
        let address = PROFILE.email();
        let subject = urlencoding::encode(&self.t.t("nav.contact")).into_owned();
        log::info!("mailto:{}?subject={}", address, subject);
        self.toast(self.t.t("hero.emailReady"));
    }

    /// OSC 52 clipboard write: supporting terminals copy without any
    /// native clipboard dependency.
    fn copy_email(&mut self) {
        let payload = BASE64.encode(PROFILE.email().as_bytes());
        let mut out = std::io::stdout();
        if let Err(e) = write!(out, "\x1b]52;c;{}\x07", payload).and_then(|_| out.flush()) {
            log::warn!("clipboard escape failed: {}", e);
        }
        self.toast(self.t.t("hero.emailCopied"));
    }

    fn submit(&mut self) {
        // Re-entry guard: one submission in flight at a time.
        if self.page.form.phase.is_sending() {
            return;
        }
        if !self.contact.available() {
            self.page.form.phase = FormPhase::Notice {
                kind: NoticeKind::Error,
                text: self.t.t("contact.form.unavailable"),
                expires: Some(Instant::now() + NOTICE_LIFETIME),
            };
            return;
        }

        let draft = self.page.form.draft();
        match self.contact.gate(&draft, Instant::now()) {
            Err(Rejection::Validation(errors)) => {
                self.page.form.errors = self.localize_errors(&errors);
                self.page.form.phase = FormPhase::Idle;
            }
            Err(Rejection::RateLimited(seconds)) => {
                let arg = ("seconds", seconds.to_string());
                self.page.form.phase = FormPhase::Notice {
                    kind: NoticeKind::Error,
                    text: self.t.t_args("contact.form.rateLimited", &[arg]),
                    expires: Some(Instant::now() + Duration::from_secs(seconds)),
                };
            }
            Ok(()) => {
                self.page.form.errors = FieldErrorTexts::default();
                self.page.form.phase = FormPhase::Sending;
                self.pending_submit = Some(self.contact.dispatch(&draft, Utc::now()));
            }
        }
    }

    fn finish_submit(&mut self, result: Result<Submission>) {
        let expires = Some(Instant::now() + NOTICE_LIFETIME);
        match result {
            Ok(submission) => {
                self.contact.record_success(Instant::now());
                self.page.form.clear_fields();
                self.page.form.errors = FieldErrorTexts::default();
                self.page.form.focus = None;
                self.page.form.phase = FormPhase::Notice {
                    kind: NoticeKind::Success,
                    text: self.t.t("contact.form.success"),
                    expires,
                };
                self.bus.publish(
                    bus::CONTACT_FORM_SUBMITTED,
                    json!({
                        "from": submission.from_email,
                        "language": self.t.active().code(),
                    }),
                );
            }
            Err(e) => {
                log::error!("contact dispatch failed: {:#}", e);
                // Draft stays in the fields for another try.
                self.page.form.phase = FormPhase::Notice {
                    kind: NoticeKind::Error,
                    text: self.t.t("contact.form.error"),
                    expires,
                };
            }
        }
    }

    fn localize_errors(&self, errors: &FieldErrors) -> FieldErrorTexts {
        let localize = |key: Option<&'static str>| key.map(|k| self.t.t(k));
        FieldErrorTexts {
            name: localize(errors.name),
            email: localize(errors.email),
            message: localize(errors.message),
        }
    }
}

fn field_capacity(id: FormFieldId) -> usize {
    match id {
        FormFieldId::Name => validate::NAME_MAX,
        FormFieldId::Email => validate::EMAIL_MAX,
        FormFieldId::Message => validate::MESSAGE_MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mailer::EmailDelivery;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingMailer {
        sent: Mutex<Vec<Submission>>,
    }

    #[async_trait]
    impl EmailDelivery for RecordingMailer {
        async fn send(&self, submission: &Submission) -> Result<()> {
            self.sent.lock().unwrap().push(submission.clone());
            Ok(())
        }
    }

    fn session() -> Session {
        let t = Arc::new(Translator::embedded(crate::i18n::Locale::Es).unwrap());
        let prefs = Arc::new(Preferences::in_memory());
        let bus = Arc::new(EventBus::new());
        let theme = Arc::new(ThemeHandle::new(crate::theme::ThemeMode::Dark));
        let mailer: Arc<dyn EmailDelivery> = Arc::new(RecordingMailer {
            sent: Mutex::new(Vec::new()),
        });
        let contact = Controller::new(Some(mailer), None);
        Session::new(t, prefs, bus, theme, contact, None, Rect::new(0, 0, 100, 30))
    }

    #[test]
    fn bootstrap_is_idempotent() {
        let mut s = session();
        s.bootstrap();
        s.bootstrap();
        s.bootstrap();
        assert_eq!(s.bus.subscriber_count(bus::LANGUAGE_CHANGED), 1);
        assert_eq!(s.bus.subscriber_count(bus::THEME_CHANGED), 1);
        assert_eq!(s.bus.subscriber_count(bus::CONTACT_FORM_SUBMITTED), 1);
    }

    #[test]
    fn language_change_arrives_as_a_rebuild_message() {
        let mut s = session();
        s.bootstrap();
        assert_eq!(s.page.active_locale, crate::i18n::Locale::Es);

        s.dispatch(Action::SelectLanguage(crate::i18n::Locale::En));
        s.drain_messages();
        assert_eq!(s.page.active_locale, crate::i18n::Locale::En);
        // and the switch toasted in the new language
        assert!(s.toasts.last().is_some());
    }

    #[test]
    fn theme_cycle_does_not_replace_the_page() {
        let mut s = session();
        s.bootstrap();
        s.page.scroll = 7;
        let lines_before = s.page.lines.len();

        s.dispatch(Action::ToggleTheme);
        s.drain_messages();
        assert_eq!(s.page.scroll, 7);
        assert_eq!(s.page.lines.len(), lines_before);
    }

    #[test]
    fn rebuild_preserves_draft_scroll_and_focus() {
        let mut s = session();
        s.page.scroll = 12;
        s.page.form.focus = Some(FormFieldId::Email);
        for c in "ana@example.com".chars() {
            s.page
                .form
                .field_mut(FormFieldId::Email)
                .handle_key(KeyCode::Char(c), 254);
        }

        s.rebuild();
        assert_eq!(s.page.scroll, 12);
        assert_eq!(s.page.form.focus, Some(FormFieldId::Email));
        assert_eq!(s.page.form.email.value, "ana@example.com");
    }

    #[test]
    fn validation_failure_localizes_all_errors_and_stays_idle() {
        let mut s = session();
        s.dispatch(Action::Submit);

        assert_eq!(s.page.form.phase, FormPhase::Idle);
        assert!(s.page.form.errors.name.is_some());
        assert!(s.page.form.errors.email.is_some());
        assert!(s.page.form.errors.message.is_some());
        // localized text, not catalog keys
        assert_ne!(
            s.page.form.errors.name.as_deref(),
            Some("contact.form.errors.nameRequired")
        );
        assert!(s.pending_submit.is_none());
    }

    #[test]
    fn valid_submission_enters_sending_phase() {
        let mut s = session();
        s.page.form.name.value = "Ana María".into();
        s.page.form.email.value = "ana@example.com".into();
        s.page.form.message.value = "Hola, me gustaría hablar contigo.".into();

        s.dispatch(Action::Submit);
        assert!(s.page.form.phase.is_sending());
        assert!(s.pending_submit.is_some());

        // re-entry while sending is ignored
        s.dispatch(Action::Submit);
        assert!(s.pending_submit.is_some());
    }

    #[test]
    fn esc_dismisses_layers_topmost_first() {
        let mut s = session();
        s.modal = Some(0);
        s.page.dropdown = ActiveDropdown::HeaderLang;

        s.dismiss_topmost();
        assert!(s.modal.is_none());
        assert_eq!(s.page.dropdown, ActiveDropdown::HeaderLang);

        s.dismiss_topmost();
        assert_eq!(s.page.dropdown, ActiveDropdown::None);
    }

    #[test]
    fn jump_scrolls_to_the_section_anchor() {
        let mut s = session();
        s.dispatch(Action::Jump(SectionId::Contact));
        let anchor = s.page.anchor(SectionId::Contact).unwrap();
        assert_eq!(
            s.page.scroll,
            anchor.min(s.page.max_scroll(s.body_height()))
        );
    }
}
