use anyhow::{Context, Result};
use eframe::egui;
use tokio::runtime::Handle;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, info, warn};

use crate::api::{ApiClient, Day, Program, ProgramDraft};
use crate::config::StudioSettings;
use crate::format::{format_date, initials, program_color};

pub mod events;
pub mod state;

use self::events::{Route, StudioCommand, StudioEvent};
use self::state::{ViewState, hex_color32};

const APP_TITLE: &str = "liftlog studio";

// User-facing copy for the Failed state. Network and server failures
// collapse into the same message; the cause only reaches the logs.
const LOAD_PROGRAMS_FAILED: &str = "Failed to load programs";
const LOAD_PROGRAM_FAILED: &str = "Failed to load program";
const CREATE_PROGRAM_FAILED: &str = "Failed to create program";

pub fn run_studio(settings: &StudioSettings) -> Result<()> {
    let runtime_handle = Handle::try_current().context("studio requires a tokio runtime")?;

    let (command_tx, command_rx) = unbounded_channel::<StudioCommand>();
    let (event_tx, event_rx) = unbounded_channel::<StudioEvent>();
    let client = ApiClient::new(settings.clone());

    spawn_runtime_worker(&runtime_handle, client, command_rx, event_tx);
    info!(
        api_base_url = %settings.api_base_url,
        "starting native studio shell"
    );

    eframe::run_native(
        APP_TITLE,
        eframe::NativeOptions::default(),
        Box::new(move |_cc| Ok(Box::new(StudioApp::new(command_tx, event_rx)))),
    )
    .map_err(|error| anyhow::anyhow!("studio UI exited with error: {error}"))
}

fn spawn_runtime_worker(
    handle: &Handle,
    client: ApiClient,
    mut command_rx: UnboundedReceiver<StudioCommand>,
    event_tx: UnboundedSender<StudioEvent>,
) {
    let _task = handle.spawn(async move {
        while let Some(command) = command_rx.recv().await {
            let event = match command {
                StudioCommand::LoadPrograms { request_id } => {
                    match client.list_programs().await {
                        Ok(programs) => StudioEvent::ProgramsLoaded {
                            request_id,
                            programs,
                        },
                        Err(error) => {
                            warn!(error = %error, "program list request failed");
                            StudioEvent::ProgramsFailed {
                                request_id,
                                message: LOAD_PROGRAMS_FAILED.to_owned(),
                            }
                        }
                    }
                }
                StudioCommand::LoadProgram { request_id, id } => {
                    match client.get_program(&id).await {
                        Ok(program) => StudioEvent::ProgramLoaded {
                            request_id,
                            program,
                        },
                        Err(error) => {
                            warn!(program_id = %id, error = %error, "program fetch failed");
                            StudioEvent::ProgramFailed {
                                request_id,
                                message: LOAD_PROGRAM_FAILED.to_owned(),
                            }
                        }
                    }
                }
                StudioCommand::CreateProgram { request_id, draft } => {
                    match client.create_program(&draft).await {
                        Ok(program) => StudioEvent::ProgramCreated {
                            request_id,
                            program,
                        },
                        Err(error) => {
                            warn!(name = %draft.name, error = %error, "program creation failed");
                            StudioEvent::ProgramCreateFailed {
                                request_id,
                                message: CREATE_PROGRAM_FAILED.to_owned(),
                            }
                        }
                    }
                }
                StudioCommand::Shutdown => break,
            };

            if event_tx.send(event).is_err() {
                break;
            }
        }
    });
}

struct StudioApp {
    command_tx: UnboundedSender<StudioCommand>,
    event_rx: UnboundedReceiver<StudioEvent>,
    route: Route,
    // Bumped at every activation; events carrying an older id are stale
    // and must not touch any view state.
    request_seq: u64,
    list_state: ViewState<Vec<Program>>,
    detail_state: ViewState<Program>,
    draft_name: String,
    draft_shared_by: String,
    draft_day_name: String,
    draft_days: Vec<Day>,
    create_in_flight: bool,
    create_error: Option<String>,
    runtime_disconnected: bool,
}

impl StudioApp {
    fn new(
        command_tx: UnboundedSender<StudioCommand>,
        event_rx: UnboundedReceiver<StudioEvent>,
    ) -> Self {
        let mut app = Self {
            command_tx,
            event_rx,
            route: Route::ProgramList,
            request_seq: 0,
            list_state: ViewState::Loading,
            detail_state: ViewState::Loading,
            draft_name: String::new(),
            draft_shared_by: String::new(),
            draft_day_name: String::new(),
            draft_days: Vec::new(),
            create_in_flight: false,
            create_error: None,
            runtime_disconnected: false,
        };
        app.navigate(Route::ProgramList);
        app
    }

    /// Changes route. Entering a data route is an activation: the view
    /// restarts at `Loading` and exactly one fetch command is issued.
    fn navigate(&mut self, route: Route) {
        self.route = route.clone();
        match route {
            Route::ProgramList => {
                self.request_seq += 1;
                self.list_state = ViewState::Loading;
                self.send_command(StudioCommand::LoadPrograms {
                    request_id: self.request_seq,
                });
            }
            Route::ProgramDetail { id } => {
                self.request_seq += 1;
                self.detail_state = ViewState::Loading;
                self.send_command(StudioCommand::LoadProgram {
                    request_id: self.request_seq,
                    id,
                });
            }
            Route::ProgramCreate => {
                self.create_in_flight = false;
                self.create_error = None;
            }
        }
    }

    fn submit_draft(&mut self) {
        let draft = ProgramDraft {
            name: self.draft_name.trim().to_owned(),
            shared_by: self.draft_shared_by.trim().to_owned(),
            days: self.draft_days.clone(),
        };
        if draft.name.is_empty() || draft.shared_by.is_empty() {
            return;
        }

        self.request_seq += 1;
        self.create_in_flight = true;
        self.create_error = None;
        self.send_command(StudioCommand::CreateProgram {
            request_id: self.request_seq,
            draft,
        });
    }

    fn send_command(&mut self, command: StudioCommand) {
        if self.command_tx.send(command).is_err() {
            self.mark_runtime_disconnected();
        }
    }

    fn drain_events(&mut self) {
        loop {
            match self.event_rx.try_recv() {
                Ok(event) => self.apply_event(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.mark_runtime_disconnected();
                    break;
                }
            }
        }
    }

    fn mark_runtime_disconnected(&mut self) {
        if !self.runtime_disconnected {
            warn!("studio runtime worker disconnected");
        }
        self.runtime_disconnected = true;
        self.create_in_flight = false;
        if self.list_state.is_loading() {
            self.list_state = ViewState::Failed(LOAD_PROGRAMS_FAILED.to_owned());
        }
        if self.detail_state.is_loading() {
            self.detail_state = ViewState::Failed(LOAD_PROGRAM_FAILED.to_owned());
        }
    }

    fn apply_event(&mut self, event: StudioEvent) {
        if event.request_id() != self.request_seq {
            debug!(
                stale_request_id = event.request_id(),
                current_request_id = self.request_seq,
                "discarding stale studio event"
            );
            return;
        }

        match event {
            StudioEvent::ProgramsLoaded { programs, .. } => {
                self.list_state = ViewState::resolve(Ok(programs));
            }
            StudioEvent::ProgramsFailed { message, .. } => {
                self.list_state = ViewState::resolve(Err(message));
            }
            StudioEvent::ProgramLoaded { program, .. } => {
                self.detail_state = ViewState::resolve(Ok(program));
            }
            StudioEvent::ProgramFailed { message, .. } => {
                self.detail_state = ViewState::resolve(Err(message));
            }
            StudioEvent::ProgramCreated { program, .. } => {
                self.create_in_flight = false;
                self.draft_name.clear();
                self.draft_shared_by.clear();
                self.draft_day_name.clear();
                self.draft_days.clear();
                self.route = Route::ProgramDetail {
                    id: program.id.clone(),
                };
                self.detail_state = ViewState::Loaded(program);
            }
            StudioEvent::ProgramCreateFailed { message, .. } => {
                self.create_in_flight = false;
                self.create_error = Some(message);
            }
        }
    }

    fn render_nav(&mut self, ui: &mut egui::Ui) {
        let mut pending_route = None;
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("liftlog").strong());
            ui.separator();
            if ui.button("Programs").clicked() {
                pending_route = Some(Route::ProgramList);
            }
            if ui.button("New program").clicked() {
                pending_route = Some(Route::ProgramCreate);
            }
            if self.runtime_disconnected {
                ui.colored_label(
                    egui::Color32::from_rgb(173, 33, 33),
                    "Runtime worker is disconnected.",
                );
            }
        });
        if let Some(route) = pending_route {
            self.navigate(route);
        }
    }

    fn render_list_pane(&mut self, ui: &mut egui::Ui) {
        ui.heading("Programs");
        ui.separator();

        let mut pending_route = None;
        match &self.list_state {
            ViewState::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading programs...");
                });
            }
            ViewState::Failed(message) => {
                ui.colored_label(egui::Color32::from_rgb(173, 33, 33), message);
            }
            ViewState::Loaded(programs) if programs.is_empty() => {
                ui.label("No programs yet.");
                if ui.button("Create your first program").clicked() {
                    pending_route = Some(Route::ProgramCreate);
                }
            }
            ViewState::Loaded(programs) => {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for program in programs {
                        ui.group(|ui| {
                            ui.horizontal(|ui| {
                                render_avatar(ui, &program.name);
                                if ui
                                    .link(egui::RichText::new(&program.name).strong())
                                    .clicked()
                                {
                                    pending_route = Some(Route::ProgramDetail {
                                        id: program.id.clone(),
                                    });
                                }
                            });
                            if !program.shared_by.is_empty() {
                                ui.label(format!("Shared by {}", program.shared_by));
                            }
                            ui.label(format_date(&program.created_at));
                        });
                        ui.add_space(6.0);
                    }
                });
            }
        }

        if let Some(route) = pending_route {
            self.navigate(route);
        }
    }

    fn render_detail_pane(&mut self, ui: &mut egui::Ui) {
        let mut pending_route = None;
        if ui.button("Back to programs").clicked() {
            pending_route = Some(Route::ProgramList);
        }
        ui.separator();

        match &self.detail_state {
            ViewState::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading program...");
                });
            }
            ViewState::Failed(message) => {
                ui.colored_label(egui::Color32::from_rgb(173, 33, 33), message);
            }
            ViewState::Loaded(program) => {
                ui.horizontal(|ui| {
                    render_avatar(ui, &program.name);
                    ui.heading(&program.name);
                });
                if !program.shared_by.is_empty() {
                    ui.label(format!("Shared by {}", program.shared_by));
                }
                ui.label(format_date(&program.created_at));
                ui.separator();

                if program.days.is_empty() {
                    ui.label("No days in this program.");
                }
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for day in &program.days {
                        ui.group(|ui| {
                            ui.label(egui::RichText::new(&day.name).strong());
                            for exercise in &day.exercises {
                                ui.label(format!(
                                    "{}: {} x {}, rest {}",
                                    exercise.name, exercise.sets, exercise.reps, exercise.rest
                                ));
                            }
                        });
                        ui.add_space(6.0);
                    }
                });
            }
        }

        if let Some(route) = pending_route {
            self.navigate(route);
        }
    }

    fn render_create_pane(&mut self, ui: &mut egui::Ui) {
        ui.heading("New program");
        ui.separator();

        ui.label("Name");
        ui.add(egui::TextEdit::singleline(&mut self.draft_name).hint_text("Full Body Workout"));
        ui.label("Shared by");
        ui.add(egui::TextEdit::singleline(&mut self.draft_shared_by).hint_text("Your name"));

        ui.add_space(8.0);
        ui.label("Days");
        let mut removed_day = None;
        for (index, day) in self.draft_days.iter().enumerate() {
            ui.horizontal(|ui| {
                ui.label(&day.name);
                if ui.small_button("Remove").clicked() {
                    removed_day = Some(index);
                }
            });
        }
        if let Some(index) = removed_day {
            self.draft_days.remove(index);
        }
        ui.horizontal(|ui| {
            ui.add(egui::TextEdit::singleline(&mut self.draft_day_name).hint_text("Day name"));
            if ui.button("Add day").clicked() && !self.draft_day_name.trim().is_empty() {
                self.draft_days.push(Day {
                    name: self.draft_day_name.trim().to_owned(),
                    ..Day::default()
                });
                self.draft_day_name.clear();
            }
        });

        ui.add_space(8.0);
        if let Some(message) = &self.create_error {
            ui.colored_label(egui::Color32::from_rgb(173, 33, 33), message);
        }

        let can_submit = !self.create_in_flight
            && !self.runtime_disconnected
            && !self.draft_name.trim().is_empty()
            && !self.draft_shared_by.trim().is_empty();
        if ui
            .add_enabled(can_submit, egui::Button::new("Create program"))
            .clicked()
        {
            self.submit_draft();
        }
        if self.create_in_flight {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Creating program...");
            });
        }
    }
}

fn render_avatar(ui: &mut egui::Ui, name: &str) {
    ui.label(
        egui::RichText::new(format!(" {} ", initials(name)))
            .strong()
            .color(egui::Color32::WHITE)
            .background_color(hex_color32(program_color(name))),
    );
}

impl Drop for StudioApp {
    fn drop(&mut self) {
        let _ = self.command_tx.send(StudioCommand::Shutdown);
    }
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        egui::TopBottomPanel::top("studio_nav").show(ctx, |ui| self.render_nav(ui));
        egui::CentralPanel::default().show(ctx, |ui| match self.route.clone() {
            Route::ProgramList => self.render_list_pane(ui),
            Route::ProgramDetail { .. } => self.render_detail_pane(ui),
            Route::ProgramCreate => self.render_create_pane(ui),
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(120));
    }
}
