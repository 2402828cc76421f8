//! Inertia Lab entry point
//!
//! Handles platform-specific initialization and wires the three explorer
//! tabs (section properties, torque dynamics, rolling race) to the DOM.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::DVec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, Element, HtmlButtonElement, HtmlCanvasElement,
        HtmlInputElement, HtmlSelectElement, MouseEvent,
    };

    use inertia_lab::consts::*;
    use inertia_lab::renderer::{
        draw_race_scene, fit_canvas,
        mohr::{draw_mohr_placeholder, draw_mohr_plot, MohrPlotData},
        ShapePainter,
    };
    use inertia_lab::rotate_point;
    use inertia_lab::sim::{geometry, AddOutcome, BodyKind, FrameClock, MohrCircle, Race, Sketch};
    use inertia_lab::view::{format_quantity, Viewport};
    use inertia_lab::Tuning;

    /// One sketch canvas plus its interaction state
    struct SketchPane {
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        width: f64,
        height: f64,
        sketch: Sketch,
        hover: Option<DVec2>,
    }

    impl SketchPane {
        fn new(document: &Document, canvas_id: &str) -> Option<Self> {
            let (canvas, ctx) = canvas_2d(document, canvas_id)?;
            Some(Self {
                canvas,
                ctx,
                width: 0.0,
                height: 0.0,
                sketch: Sketch::default(),
                hover: None,
            })
        }

        fn fit(&mut self) {
            if let Some((w, h)) = fit_canvas(&self.canvas, &self.ctx) {
                self.width = w;
                self.height = h;
            }
        }

        fn viewport(&self, scale: f64) -> Viewport {
            Viewport::new(self.width, self.height, scale)
        }

        /// Mouse position in math coordinates
        fn mouse_point(&self, event: &MouseEvent, scale: f64) -> DVec2 {
            let rect = self.canvas.get_bounding_client_rect();
            let screen = DVec2::new(
                event.client_x() as f64 - rect.left(),
                event.client_y() as f64 - rect.top(),
            );
            self.viewport(scale).screen_to_math(screen)
        }
    }

    /// Single-canvas plot surface (Mohr's circle, race scene)
    struct PlotPane {
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        width: f64,
        height: f64,
    }

    impl PlotPane {
        fn new(document: &Document, canvas_id: &str) -> Option<Self> {
            let (canvas, ctx) = canvas_2d(document, canvas_id)?;
            Some(Self {
                canvas,
                ctx,
                width: 0.0,
                height: 0.0,
            })
        }

        fn fit(&mut self) {
            if let Some((w, h)) = fit_canvas(&self.canvas, &self.ctx) {
                self.width = w;
                self.height = h;
            }
        }
    }

    /// Section properties tab
    struct SectionTab {
        pane: SketchPane,
        mohr: PlotPane,
    }

    /// Torque dynamics tab: two shapes compared under the same moment
    struct SpinTab {
        panes: [SketchPane; 2],
        moment: f64,
        clock: FrameClock,
    }

    const SPIN_LABELS: [&str; 2] = ["A", "B"];

    /// Rolling race tab
    struct RaceTab {
        pane: PlotPane,
        race: Race,
        clock: FrameClock,
        elapsed: f64,
    }

    struct App {
        tuning: Tuning,
        section: SectionTab,
        spin: SpinTab,
        race: RaceTab,
    }

    impl App {
        fn new(document: &Document, tuning: Tuning) -> Option<Self> {
            let mut race = Race::new();
            race.add_participant(Some("Solid sphere".into()), Some(BodyKind::SolidSphere));
            race.add_participant(Some("Hollow cylinder".into()), Some(BodyKind::HollowCylinder));

            Some(Self {
                tuning,
                section: SectionTab {
                    pane: SketchPane::new(document, "shapeCanvas")?,
                    mohr: PlotPane::new(document, "mohrCanvas")?,
                },
                spin: SpinTab {
                    panes: [
                        SketchPane::new(document, "shapeCanvasA")?,
                        SketchPane::new(document, "shapeCanvasB")?,
                    ],
                    moment: 0.0,
                    clock: FrameClock::new(Some(MAX_TIME_STEP)),
                },
                race: RaceTab {
                    pane: PlotPane::new(document, "raceCanvas")?,
                    race,
                    clock: FrameClock::new(None),
                    elapsed: 0.0,
                },
            })
        }

        fn fit_canvases(&mut self) {
            self.section.pane.fit();
            self.section.mohr.fit();
            for pane in &mut self.spin.panes {
                pane.fit();
            }
            self.race.pane.fit();
        }

        // === Section tab ===

        fn section_reference(&self, document: &Document) -> (DVec2, f64) {
            let ref_point = DVec2::new(
                input_number(document, "refX"),
                input_number(document, "refY"),
            );
            let theta = input_number(document, "rotation").to_radians();
            (ref_point, theta)
        }

        fn draw_section(&self, document: &Document) {
            let pane = &self.section.pane;
            let painter = ShapePainter::new(
                pane.ctx.clone(),
                pane.viewport(self.tuning.section_canvas_scale),
            );
            painter.clear();
            painter.draw_grid();
            painter.draw_axes();

            let vertices = pane.sketch.vertices();
            let closed = pane.sketch.is_closed();
            painter.draw_polygon(vertices, closed, false);
            painter.draw_vertices(vertices, false);
            if !closed {
                if let Some(hover) = pane.hover {
                    painter.draw_hover_preview(vertices, hover);
                }
            }

            if let Some(props) = pane.sketch.metrics() {
                painter.draw_centroid_marker(props.centroid);
            }

            let (ref_point, theta) = self.section_reference(document);
            painter.draw_rotated_axes(ref_point, theta);
            painter.draw_reference_point(ref_point);
        }

        /// Recompute the results table and Mohr's circle from current inputs
        fn update_section_outputs(&self, document: &Document) {
            const CELLS: [&str; 12] = [
                "areaCell",
                "centroidCell",
                "ixCentroidCell",
                "iyCentroidCell",
                "ixyCentroidCell",
                "ixRefCell",
                "iyRefCell",
                "ixyRefCell",
                "ixRotCell",
                "iyRotCell",
                "ixyRotCell",
                "polarCell",
            ];

            let Some(props) = self.section.pane.sketch.metrics() else {
                for id in CELLS {
                    set_text(document, id, "\u{2014}");
                }
                set_text(
                    document,
                    "mohrLegend",
                    "Add a closed shape to view Mohr's circle.",
                );
                draw_mohr_placeholder(
                    &self.section.mohr.ctx,
                    self.section.mohr.width,
                    self.section.mohr.height,
                );
                self.draw_section(document);
                return;
            };

            let (ref_point, theta) = self.section_reference(document);
            let (ix_ref, iy_ref, ixy_ref) = geometry::parallel_axis(props, ref_point);
            let (ix_rot, iy_rot, ixy_rot) =
                geometry::transform_axes(ix_ref, iy_ref, ixy_ref, theta);
            let circle = MohrCircle::from_moments(ix_ref, iy_ref, ixy_ref);

            let quantity =
                |value: f64, unit: &str| format!("{} ({unit})", format_quantity(value, 3));
            set_text(document, "areaCell", &quantity(props.area, "units^2"));
            set_text(
                document,
                "centroidCell",
                &format!(
                    "({}, {})",
                    format_quantity(props.centroid.x, 3),
                    format_quantity(props.centroid.y, 3)
                ),
            );
            set_text(
                document,
                "ixCentroidCell",
                &quantity(props.ix_centroid.abs(), "units^4"),
            );
            set_text(
                document,
                "iyCentroidCell",
                &quantity(props.iy_centroid.abs(), "units^4"),
            );
            set_text(
                document,
                "ixyCentroidCell",
                &quantity(props.ixy_centroid, "units^4"),
            );
            set_text(document, "ixRefCell", &quantity(ix_ref.abs(), "units^4"));
            set_text(document, "iyRefCell", &quantity(iy_ref.abs(), "units^4"));
            set_text(document, "ixyRefCell", &quantity(ixy_ref, "units^4"));
            set_text(document, "ixRotCell", &quantity(ix_rot.abs(), "units^4"));
            set_text(document, "iyRotCell", &quantity(iy_rot.abs(), "units^4"));
            set_text(document, "ixyRotCell", &quantity(ixy_rot, "units^4"));
            set_text(
                document,
                "polarCell",
                &quantity(props.iz_centroid.abs(), "units^4"),
            );
            set_text(
                document,
                "mohrLegend",
                &format!(
                    "Principal inertias: I1 = {}, I2 = {} (units^4)",
                    format_quantity(circle.i_max, 3),
                    format_quantity(circle.i_min, 3)
                ),
            );

            draw_mohr_plot(
                &self.section.mohr.ctx,
                self.section.mohr.width,
                self.section.mohr.height,
                &MohrPlotData {
                    circle,
                    ix_ref,
                    iy_ref,
                    ixy_ref,
                    ix_rot,
                    ixy_rot,
                },
            );
            self.draw_section(document);
        }

        // === Spin tab ===

        fn draw_spin(&self) {
            for pane in &self.spin.panes {
                let painter = ShapePainter::new(
                    pane.ctx.clone(),
                    pane.viewport(self.tuning.spin_canvas_scale),
                );
                painter.clear();
                painter.draw_grid();
                painter.draw_axes();

                if pane.sketch.is_closed() {
                    let at_limit = pane.sketch.spin.at_limit();
                    let angle = pane.sketch.spin.angle;
                    let rotated: Vec<DVec2> = pane
                        .sketch
                        .vertices()
                        .iter()
                        .map(|v| rotate_point(*v, angle))
                        .collect();
                    painter.draw_polygon(&rotated, true, at_limit);
                    painter.draw_vertices(&rotated, at_limit);
                    if let Some(props) = pane.sketch.metrics() {
                        painter.draw_centroid_marker(rotate_point(props.centroid, angle));
                    }
                    painter.draw_moment_indicator(self.spin.moment, self.tuning.moment.max);
                } else {
                    let vertices = pane.sketch.vertices();
                    painter.draw_polygon(vertices, false, false);
                    painter.draw_vertices(vertices, false);
                    if let Some(hover) = pane.hover {
                        painter.draw_hover_preview(vertices, hover);
                    }
                }
            }
        }

        fn spin_alpha(&self, index: usize) -> Option<f64> {
            let props = self.spin.panes[index].sketch.metrics()?;
            inertia_lab::sim::rotation::angular_acceleration(self.spin.moment, props.iz_origin)
        }

        fn spin_ready(&self) -> bool {
            (0..self.spin.panes.len()).all(|i| self.spin_alpha(i).is_some())
        }

        fn step_spin(&mut self, dt: f64) {
            let moment = self.spin.moment;
            for pane in &mut self.spin.panes {
                let Some(props) = pane.sketch.metrics().copied() else {
                    continue;
                };
                let Some(alpha) =
                    inertia_lab::sim::rotation::angular_acceleration(moment, props.iz_origin)
                else {
                    continue;
                };
                inertia_lab::sim::rotation::step(&mut pane.sketch.spin, alpha, dt);
            }
        }

        fn update_spin_info(&self, document: &Document) {
            for (index, label) in SPIN_LABELS.iter().enumerate() {
                let pane = &self.spin.panes[index];
                let izz_id = format!("izzDisplay{label}");
                let alpha_id = format!("alphaDisplay{label}");
                let omega_id = format!("omegaDisplay{label}");

                match pane.sketch.metrics() {
                    Some(props) => {
                        set_text(
                            document,
                            &izz_id,
                            &format!("{} units^4", format_quantity(props.iz_origin, 3)),
                        );
                        let alpha_text = match self.spin_alpha(index) {
                            Some(alpha) => format!("{} rad/s^2", format_quantity(alpha, 2)),
                            None => "-- rad/s^2".to_string(),
                        };
                        set_text(document, &alpha_id, &alpha_text);
                    }
                    None => {
                        set_text(document, &izz_id, "-- units^4");
                        set_text(document, &alpha_id, "-- rad/s^2");
                    }
                }

                set_text(
                    document,
                    &omega_id,
                    &format!("{} rad/s", format_quantity(pane.sketch.spin.omega, 2)),
                );
                if let Some(el) = document.get_element_by_id(&omega_id) {
                    let _ = el
                        .class_list()
                        .toggle_with_force("highlighted", pane.sketch.spin.at_limit());
                }
            }
        }

        fn update_spin_status(&self, document: &Document) {
            let all_closed = self.spin.panes.iter().all(|p| p.sketch.is_closed());
            let message = if !all_closed {
                "Complete both shapes to compute their centroids and inertia.".to_string()
            } else if !self.spin_ready() {
                "Each shape must enclose a non-zero area. Reset and adjust any invalid shape."
                    .to_string()
            } else if self.spin.clock.is_running() {
                let alpha_text = |index| match self.spin_alpha(index) {
                    Some(alpha) => format_quantity(alpha, 2),
                    None => "--".to_string(),
                };
                format!(
                    "Animating: alpha_A = {} rad/s^2, alpha_B = {} rad/s^2.",
                    alpha_text(0),
                    alpha_text(1)
                )
            } else {
                "Shapes ready. Rotation occurs about the origin. Adjust M and press Play to compare the rotations."
                    .to_string()
            };
            set_text(document, "statusMessage", &message);
        }

        fn update_spin_buttons(&self, document: &Document) {
            for (index, label) in SPIN_LABELS.iter().enumerate() {
                let pane = &self.spin.panes[index];
                set_disabled(
                    document,
                    &format!("completeBtn{label}"),
                    pane.sketch.is_closed() || !pane.sketch.can_complete(),
                );
            }
            set_disabled(
                document,
                "playBtn",
                !self.spin_ready() || self.spin.clock.is_running(),
            );
            set_disabled(document, "pauseBtn", !self.spin.clock.is_running());
        }

        fn refresh_spin(&self, document: &Document) {
            self.update_spin_info(document);
            self.update_spin_buttons(document);
            self.update_spin_status(document);
            self.draw_spin();
        }

        // === Race tab ===

        fn clamp_ramp_inputs(&mut self, document: &Document) {
            self.race.race.ramp.length = self
                .tuning
                .ramp_length
                .clamp(input_number(document, "rampLengthInput"));
            self.race.race.ramp.angle_degrees = self
                .tuning
                .ramp_angle
                .clamp(input_number(document, "rampAngleInput"));
            self.race.race.ramp.gravity = self
                .tuning
                .gravity
                .clamp(input_number(document, "gravityInput"));
            self.sync_ramp_inputs(document);
        }

        fn sync_ramp_inputs(&self, document: &Document) {
            let ramp = &self.race.race.ramp;
            for (id, value) in [
                ("rampLengthSlider", ramp.length),
                ("rampLengthInput", ramp.length),
                ("rampAngleSlider", ramp.angle_degrees),
                ("rampAngleInput", ramp.angle_degrees),
                ("gravitySlider", ramp.gravity),
                ("gravityInput", ramp.gravity),
            ] {
                set_input_value(document, id, &format!("{value}"));
            }
            set_text(
                document,
                "verticalDropDisplay",
                &format!("{} m", format_quantity(ramp.vertical_drop(), 2)),
            );
            set_text(
                document,
                "gravityDisplay",
                &format!("{} m/s^2", format_quantity(ramp.gravity, 2)),
            );
        }

        fn draw_race(&self) {
            let standings = self.race.race.standings();
            draw_race_scene(
                &self.race.pane.ctx,
                self.race.pane.width,
                self.race.pane.height,
                &self.race.race,
                &standings,
                self.elapsed_for_draw(),
            );
        }

        fn elapsed_for_draw(&self) -> f64 {
            self.race.elapsed.min(self.race.race.max_finish_time())
        }

        fn update_race_results(&self, document: &Document) {
            let standings = self.race.race.standings();

            let mut rows = String::new();
            if standings.is_empty() {
                rows.push_str(
                    "<tr><td colspan=\"5\" class=\"empty\">Add objects to compare race times.</td></tr>",
                );
            } else {
                for (rank, entry) in standings.iter().enumerate() {
                    let Some(participant) = self.race.race.participant(entry.participant_id)
                    else {
                        continue;
                    };
                    let class = if rank == 0 { " class=\"leader\"" } else { "" };
                    rows.push_str(&format!(
                        "<tr{class}><td>{}</td><td>{}</td><td>{:.2}</td><td>{:.3}</td><td>{:.2}</td></tr>",
                        rank + 1,
                        participant.name,
                        entry.acceleration,
                        entry.finish_time,
                        entry.final_velocity,
                    ));
                }
                if standings.len() < MIN_RACERS {
                    rows.push_str(
                        "<tr><td colspan=\"5\" class=\"empty\">Add another object to start a race.</td></tr>",
                    );
                }
            }
            if let Some(body) = document.get_element_by_id("resultsBody") {
                body.set_inner_html(&rows);
            }

            self.update_race_status(document);
            self.update_race_buttons(document);
            self.draw_race();
        }

        fn update_race_status(&self, document: &Document) {
            set_text(
                document,
                "raceTimeDisplay",
                &format!("{:.2} s", self.elapsed_for_draw()),
            );

            let standings = self.race.race.standings();
            let text = if standings.is_empty()
                || (!self.race.clock.is_running() && self.race.elapsed == 0.0)
            {
                "--".to_string()
            } else if self.race.elapsed >= self.race.race.max_finish_time() {
                match self.race.race.winner() {
                    Some(winner) => format!("Winner: {}", winner.name),
                    None => "--".to_string(),
                }
            } else {
                match self.race.race.leader_at(self.race.elapsed) {
                    Some(leader) => leader.name.clone(),
                    None => "--".to_string(),
                }
            };
            set_text(document, "raceLeaderDisplay", &text);
        }

        fn update_race_buttons(&self, document: &Document) {
            let can_race = self.race.race.can_race() && self.race.race.max_finish_time() > 0.0;
            set_disabled(
                document,
                "racePlayBtn",
                !can_race || self.race.clock.is_running(),
            );
            set_disabled(document, "racePauseBtn", !self.race.clock.is_running());
        }

        fn render_participants(app: &Rc<RefCell<App>>, document: &Document) {
            let Some(list) = document.get_element_by_id("participantsList") else {
                return;
            };
            list.set_inner_html("");

            struct RowData {
                id: u32,
                name: String,
                kind: BodyKind,
                radius: f64,
                mass: f64,
                inertia: f64,
            }

            let (entries, only_one, radius_range, mass_range) = {
                let a = app.borrow();
                let entries: Vec<RowData> = a
                    .race
                    .race
                    .participants
                    .iter()
                    .map(|p| RowData {
                        id: p.id,
                        name: p.name.clone(),
                        kind: p.kind,
                        radius: p.radius,
                        mass: p.mass,
                        inertia: p.moment_of_inertia(),
                    })
                    .collect();
                (
                    entries,
                    a.race.race.participants.len() <= 1,
                    a.tuning.body_radius,
                    a.tuning.body_mass,
                )
            };

            for row_data in entries {
                let Ok(row) = document.create_element("div") else {
                    continue;
                };
                row.set_class_name("participant-row");

                let options: String = BodyKind::ALL
                    .iter()
                    .map(|k| {
                        format!(
                            "<option value=\"{}\"{}>{}</option>",
                            k.key(),
                            if *k == row_data.kind { " selected" } else { "" },
                            k.label()
                        )
                    })
                    .collect();
                row.set_inner_html(&format!(
                    concat!(
                        "<span class=\"participant-name\">{name}</span>",
                        "<select class=\"kind-select\">{options}</select>",
                        "<input class=\"radius-input\" type=\"number\" step=\"0.01\" ",
                        "min=\"{rmin}\" max=\"{rmax}\" value=\"{radius}\">",
                        "<input class=\"mass-input\" type=\"number\" step=\"0.1\" ",
                        "min=\"{mmin}\" max=\"{mmax}\" value=\"{mass}\">",
                        "<span class=\"inertia-display\">I = {inertia} kg*m^2</span>",
                        "<button class=\"remove-btn\"{disabled}>Remove</button>",
                    ),
                    name = row_data.name,
                    options = options,
                    rmin = radius_range.min,
                    rmax = radius_range.max,
                    radius = row_data.radius,
                    mmin = mass_range.min,
                    mmax = mass_range.max,
                    mass = row_data.mass,
                    inertia = format_quantity(row_data.inertia, 4),
                    disabled = if only_one { " disabled" } else { "" },
                ));

                let id = row_data.id;

                if let Some(select) = row
                    .query_selector(".kind-select")
                    .ok()
                    .flatten()
                    .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
                {
                    let app = app.clone();
                    let select_clone = select.clone();
                    on_event(&select, "change", move |_| {
                        if let Some(kind) = BodyKind::from_key(&select_clone.value()) {
                            {
                                let mut a = app.borrow_mut();
                                if let Some(p) = a.race.race.participant_mut(id) {
                                    p.kind = kind;
                                }
                            }
                            refresh_race(&app);
                        }
                    });
                }

                if let Some(input) = row
                    .query_selector(".radius-input")
                    .ok()
                    .flatten()
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                {
                    let app = app.clone();
                    let input_clone = input.clone();
                    on_event(&input, "change", move |_| {
                        let value = input_clone.value().parse().unwrap_or(f64::NAN);
                        {
                            let mut a = app.borrow_mut();
                            let clamped = a.tuning.body_radius.clamp(value);
                            if let Some(p) = a.race.race.participant_mut(id) {
                                p.radius = clamped;
                            }
                        }
                        refresh_race(&app);
                    });
                }

                if let Some(input) = row
                    .query_selector(".mass-input")
                    .ok()
                    .flatten()
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                {
                    let app = app.clone();
                    let input_clone = input.clone();
                    on_event(&input, "change", move |_| {
                        let value = input_clone.value().parse().unwrap_or(f64::NAN);
                        {
                            let mut a = app.borrow_mut();
                            let clamped = a.tuning.body_mass.clamp(value);
                            if let Some(p) = a.race.race.participant_mut(id) {
                                p.mass = clamped;
                            }
                        }
                        refresh_race(&app);
                    });
                }

                if let Some(button) = row.query_selector(".remove-btn").ok().flatten() {
                    let app = app.clone();
                    on_event(&button, "click", move |_| {
                        let removed = app.borrow_mut().race.race.remove_participant(id);
                        if removed {
                            refresh_race(&app);
                        }
                    });
                }

                let _ = list.append_child(&row);
            }
        }
    }

    // === DOM helpers ===

    fn document() -> Document {
        web_sys::window()
            .expect("no window")
            .document()
            .expect("no document")
    }

    fn canvas_2d(
        document: &Document,
        id: &str,
    ) -> Option<(HtmlCanvasElement, CanvasRenderingContext2d)> {
        let canvas: HtmlCanvasElement = document.get_element_by_id(id)?.dyn_into().ok()?;
        let ctx = inertia_lab::renderer::context_2d(&canvas)?;
        Some((canvas, ctx))
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn input_number(document: &Document, id: &str) -> f64 {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.value().parse().ok())
            .unwrap_or(0.0)
    }

    fn set_input_value(document: &Document, id: &str, value: &str) {
        if let Some(input) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_value(value);
        }
    }

    fn set_disabled(document: &Document, id: &str, disabled: bool) {
        if let Some(button) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
        {
            button.set_disabled(disabled);
        }
    }

    fn on_event<T, F>(target: &T, kind: &str, handler: F)
    where
        T: AsRef<web_sys::EventTarget>,
        F: FnMut(web_sys::Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        let _ = target
            .as_ref()
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_mouse<T, F>(target: &T, kind: &str, handler: F)
    where
        T: AsRef<web_sys::EventTarget>,
        F: FnMut(MouseEvent) + 'static,
    {
        let closure = Closure::<dyn FnMut(_)>::new(handler);
        let _ = target
            .as_ref()
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // === Animation loops ===

    fn request_frame(f: impl FnOnce(f64) + 'static) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(f);
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn spin_frame(app: Rc<RefCell<App>>, time: f64) {
        let document = document();
        {
            let mut a = app.borrow_mut();
            let Some(dt) = a.spin.clock.tick(time) else {
                return;
            };
            a.step_spin(dt);
            a.refresh_spin(&document);
        }
        request_frame(move |t| spin_frame(app, t));
    }

    fn race_frame(app: Rc<RefCell<App>>, time: f64) {
        let document = document();
        let finished = {
            let mut a = app.borrow_mut();
            let Some(dt) = a.race.clock.tick(time) else {
                return;
            };
            let max_time = a.race.race.max_finish_time();
            a.race.elapsed = (a.race.elapsed + dt).min(max_time);
            let finished = a.race.elapsed >= max_time;
            if finished {
                a.race.clock.stop();
            }
            a.draw_race();
            a.update_race_status(&document);
            a.update_race_buttons(&document);
            finished
        };
        if !finished {
            request_frame(move |t| race_frame(app, t));
        }
    }

    fn refresh_race(app: &Rc<RefCell<App>>) {
        let document = document();
        App::render_participants(app, &document);
        app.borrow().update_race_results(&document);
    }

    // === Listener wiring ===

    fn setup_section_tab(app: Rc<RefCell<App>>) {
        let document = document();
        let canvas = app.borrow().section.pane.canvas.clone();

        {
            let app = app.clone();
            on_mouse(&canvas, "mousedown", move |event: MouseEvent| {
                let document = self::document();
                let outcome = {
                    let mut a = app.borrow_mut();
                    let scale = a.tuning.section_canvas_scale;
                    let tolerance = a.tuning.close_gesture_px / scale;
                    let point = a.section.pane.mouse_point(&event, scale);
                    a.section.pane.sketch.add_vertex(point, tolerance)
                };
                if outcome == AddOutcome::CloseGesture {
                    complete_section_shape(&app);
                } else {
                    app.borrow().update_section_outputs(&document);
                }
            });
        }

        {
            let app = app.clone();
            on_mouse(&canvas, "dblclick", move |event: MouseEvent| {
                event.prevent_default();
                complete_section_shape(&app);
            });
        }

        {
            let app = app.clone();
            on_mouse(&canvas, "mousemove", move |event: MouseEvent| {
                let document = self::document();
                {
                    let mut a = app.borrow_mut();
                    let scale = a.tuning.section_canvas_scale;
                    let hover = if a.section.pane.sketch.is_closed()
                        || a.section.pane.sketch.vertices().is_empty()
                    {
                        None
                    } else {
                        Some(a.section.pane.mouse_point(&event, scale))
                    };
                    a.section.pane.hover = hover;
                }
                app.borrow().draw_section(&document);
            });
        }

        {
            let app = app.clone();
            on_mouse(&canvas, "mouseleave", move |_| {
                let document = self::document();
                app.borrow_mut().section.pane.hover = None;
                app.borrow().draw_section(&document);
            });
        }

        if let Some(btn) = document.get_element_by_id("completeBtn") {
            let app = app.clone();
            on_event(&btn, "click", move |_| complete_section_shape(&app));
        }

        if let Some(btn) = document.get_element_by_id("resetBtn") {
            let app = app.clone();
            on_event(&btn, "click", move |_| {
                let document = self::document();
                app.borrow_mut().section.pane.sketch.reset();
                set_disabled(&document, "completeBtn", true);
                set_disabled(&document, "useCentroidBtn", true);
                app.borrow().update_section_outputs(&document);
            });
        }

        if let Some(btn) = document.get_element_by_id("useCentroidBtn") {
            let app = app.clone();
            on_event(&btn, "click", move |_| {
                let document = self::document();
                let centroid = app
                    .borrow()
                    .section
                    .pane
                    .sketch
                    .metrics()
                    .map(|props| props.centroid);
                if let Some(centroid) = centroid {
                    set_input_value(&document, "refX", &format!("{:.3}", centroid.x));
                    set_input_value(&document, "refY", &format!("{:.3}", centroid.y));
                    app.borrow().update_section_outputs(&document);
                }
            });
        }

        for id in ["refX", "refY", "rotation"] {
            if let Some(el) = document.get_element_by_id(id) {
                let app = app.clone();
                on_event(&el, "input", move |_| {
                    let document = self::document();
                    app.borrow().update_section_outputs(&document);
                });
            }
        }
    }

    fn complete_section_shape(app: &Rc<RefCell<App>>) {
        let document = document();
        let result = app.borrow_mut().section.pane.sketch.complete().map(|_| ());
        match result {
            Ok(()) => {
                set_disabled(&document, "completeBtn", true);
                set_disabled(&document, "useCentroidBtn", false);
            }
            Err(err) => {
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(&err.to_string());
                }
            }
        }
        app.borrow().update_section_outputs(&document);
    }

    fn setup_spin_tab(app: Rc<RefCell<App>>) {
        let document = document();

        for (index, label) in SPIN_LABELS.iter().enumerate() {
            let canvas = app.borrow().spin.panes[index].canvas.clone();

            {
                let app = app.clone();
                on_mouse(&canvas, "mousedown", move |event: MouseEvent| {
                    let document = self::document();
                    let outcome = {
                        let mut a = app.borrow_mut();
                        let scale = a.tuning.spin_canvas_scale;
                        let tolerance = a.tuning.close_gesture_px / scale;
                        let point = a.spin.panes[index].mouse_point(&event, scale);
                        a.spin.panes[index].sketch.add_vertex(point, tolerance)
                    };
                    if outcome == AddOutcome::CloseGesture {
                        complete_spin_shape(&app, index);
                    } else {
                        app.borrow().refresh_spin(&document);
                    }
                });
            }

            {
                let app = app.clone();
                on_mouse(&canvas, "dblclick", move |event: MouseEvent| {
                    event.prevent_default();
                    complete_spin_shape(&app, index);
                });
            }

            {
                let app = app.clone();
                on_mouse(&canvas, "mousemove", move |event: MouseEvent| {
                    {
                        let mut a = app.borrow_mut();
                        let scale = a.tuning.spin_canvas_scale;
                        let hover = if a.spin.panes[index].sketch.is_closed()
                            || a.spin.panes[index].sketch.vertices().is_empty()
                        {
                            None
                        } else {
                            Some(a.spin.panes[index].mouse_point(&event, scale))
                        };
                        a.spin.panes[index].hover = hover;
                    }
                    app.borrow().draw_spin();
                });
            }

            {
                let app = app.clone();
                on_mouse(&canvas, "mouseleave", move |_| {
                    app.borrow_mut().spin.panes[index].hover = None;
                    app.borrow().draw_spin();
                });
            }

            if let Some(btn) = document.get_element_by_id(&format!("completeBtn{label}")) {
                let app = app.clone();
                on_event(&btn, "click", move |_| complete_spin_shape(&app, index));
            }

            if let Some(btn) = document.get_element_by_id(&format!("resetShapeBtn{label}")) {
                let app = app.clone();
                on_event(&btn, "click", move |_| {
                    let document = self::document();
                    {
                        let mut a = app.borrow_mut();
                        a.spin.clock.stop();
                        a.spin.panes[index].sketch.reset();
                    }
                    app.borrow().refresh_spin(&document);
                });
            }
        }

        for id in ["momentSlider", "momentInput"] {
            if let Some(el) = document.get_element_by_id(id) {
                let app = app.clone();
                on_event(&el, "input", move |event| {
                    let document = self::document();
                    let value = event
                        .target()
                        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                        .and_then(|input| input.value().parse().ok())
                        .unwrap_or(f64::NAN);
                    let moment = {
                        let mut a = app.borrow_mut();
                        a.spin.moment = a.tuning.moment.clamp(value);
                        a.spin.moment
                    };
                    set_input_value(&document, "momentSlider", &format!("{moment}"));
                    set_input_value(&document, "momentInput", &format!("{moment}"));
                    app.borrow().refresh_spin(&document);
                });
            }
        }

        if let Some(btn) = document.get_element_by_id("playBtn") {
            let app = app.clone();
            on_event(&btn, "click", move |_| {
                let document = self::document();
                let started = {
                    let mut a = app.borrow_mut();
                    if a.spin_ready() && !a.spin.clock.is_running() {
                        a.spin.clock.start();
                        true
                    } else {
                        false
                    }
                };
                app.borrow().refresh_spin(&document);
                if started {
                    let app = app.clone();
                    request_frame(move |t| spin_frame(app, t));
                }
            });
        }

        if let Some(btn) = document.get_element_by_id("pauseBtn") {
            let app = app.clone();
            on_event(&btn, "click", move |_| {
                let document = self::document();
                app.borrow_mut().spin.clock.stop();
                app.borrow().refresh_spin(&document);
            });
        }

        if let Some(btn) = document.get_element_by_id("resetMotionBtn") {
            let app = app.clone();
            on_event(&btn, "click", move |_| {
                let document = self::document();
                {
                    let mut a = app.borrow_mut();
                    a.spin.clock.stop();
                    for pane in &mut a.spin.panes {
                        pane.sketch.spin.reset();
                    }
                }
                app.borrow().refresh_spin(&document);
            });
        }
    }

    fn complete_spin_shape(app: &Rc<RefCell<App>>, index: usize) {
        let document = document();
        let result = {
            let mut a = app.borrow_mut();
            a.spin.panes[index].sketch.complete().map(|_| ())
        };
        if let Err(err) = result {
            set_text(&document, "statusMessage", &err.to_string());
            return;
        }
        app.borrow().refresh_spin(&document);
    }

    fn setup_race_tab(app: Rc<RefCell<App>>) {
        let document = document();

        for id in [
            "rampLengthSlider",
            "rampLengthInput",
            "rampAngleSlider",
            "rampAngleInput",
            "gravitySlider",
            "gravityInput",
        ] {
            if let Some(el) = document.get_element_by_id(id) {
                let app = app.clone();
                on_event(&el, "input", move |event| {
                    let document = self::document();
                    // Sliders feed their paired numeric input before the clamp
                    if let Some(input) = event
                        .target()
                        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                    {
                        let value = input.value();
                        match input.id().as_str() {
                            "rampLengthSlider" => {
                                set_input_value(&document, "rampLengthInput", &value)
                            }
                            "rampAngleSlider" => {
                                set_input_value(&document, "rampAngleInput", &value)
                            }
                            "gravitySlider" => set_input_value(&document, "gravityInput", &value),
                            _ => {}
                        }
                    }
                    {
                        let mut a = app.borrow_mut();
                        a.clamp_ramp_inputs(&document);
                        a.race.clock.stop();
                        a.race.elapsed = 0.0;
                    }
                    app.borrow().update_race_results(&document);
                });
            }
        }

        if let Some(btn) = document.get_element_by_id("addParticipantBtn") {
            let app = app.clone();
            on_event(&btn, "click", move |_| {
                app.borrow_mut().race.race.add_participant(None, None);
                refresh_race(&app);
            });
        }

        if let Some(btn) = document.get_element_by_id("racePlayBtn") {
            let app = app.clone();
            on_event(&btn, "click", move |_| {
                let document = self::document();
                let started = {
                    let mut a = app.borrow_mut();
                    let can_race = a.race.race.can_race() && a.race.race.max_finish_time() > 0.0;
                    if can_race && !a.race.clock.is_running() {
                        a.race.elapsed = 0.0;
                        a.race.clock.start();
                        true
                    } else {
                        false
                    }
                };
                app.borrow().update_race_buttons(&document);
                if started {
                    let app = app.clone();
                    request_frame(move |t| race_frame(app, t));
                }
            });
        }

        if let Some(btn) = document.get_element_by_id("racePauseBtn") {
            let app = app.clone();
            on_event(&btn, "click", move |_| {
                let document = self::document();
                app.borrow_mut().race.clock.stop();
                let a = app.borrow();
                a.update_race_status(&document);
                a.update_race_buttons(&document);
            });
        }

        if let Some(btn) = document.get_element_by_id("raceResetBtn") {
            let app = app.clone();
            on_event(&btn, "click", move |_| {
                let document = self::document();
                {
                    let mut a = app.borrow_mut();
                    a.race.clock.stop();
                    a.race.elapsed = 0.0;
                }
                app.borrow().update_race_results(&document);
            });
        }
    }

    fn setup_tabs(app: Rc<RefCell<App>>) {
        let document = document();
        let Ok(buttons) = document.query_selector_all(".tab-button") else {
            return;
        };

        for i in 0..buttons.length() {
            let Some(button) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let app = app.clone();
            let button_clone = button.clone();
            on_event(&button, "click", move |_| {
                let document = self::document();
                let Some(target) = button_clone.get_attribute("data-tab") else {
                    return;
                };
                let Ok(all) = document.query_selector_all(".tab-button") else {
                    return;
                };
                for j in 0..all.length() {
                    let Some(btn) = all.item(j).and_then(|n| n.dyn_into::<Element>().ok()) else {
                        continue;
                    };
                    let tab = btn.get_attribute("data-tab").unwrap_or_default();
                    let active = tab == target;
                    let _ = btn.class_list().toggle_with_force("is-active", active);
                    let _ =
                        btn.set_attribute("aria-selected", if active { "true" } else { "false" });
                    if let Some(panel) = document.get_element_by_id(&format!("{tab}Panel")) {
                        let _ = panel.class_list().toggle_with_force("is-active", active);
                        let _ = panel
                            .set_attribute("aria-hidden", if active { "false" } else { "true" });
                    }
                }
                // The newly shown panel has fresh layout; refit and redraw
                redraw_all(&app);
            });
        }
    }

    fn redraw_all(app: &Rc<RefCell<App>>) {
        let document = document();
        app.borrow_mut().fit_canvases();
        let a = app.borrow();
        a.update_section_outputs(&document);
        a.refresh_spin(&document);
        a.sync_ramp_inputs(&document);
        a.update_race_results(&document);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Inertia Lab starting...");

        let document = document();

        let tuning = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
            .and_then(|json| match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides");
                    Some(tuning)
                }
                Err(err) => {
                    log::warn!("Ignoring invalid tuning overrides: {err}");
                    None
                }
            })
            .unwrap_or_default();

        let Some(mut app) = App::new(&document, tuning) else {
            log::error!("Required canvases missing from the page");
            return;
        };
        app.race.race.ramp.length = app.tuning.ramp_length.default;
        app.race.race.ramp.angle_degrees = app.tuning.ramp_angle.default;
        app.race.race.ramp.gravity = app.tuning.gravity.default;
        app.spin.moment = app.tuning.moment.default;

        let app = Rc::new(RefCell::new(app));

        setup_section_tab(app.clone());
        setup_spin_tab(app.clone());
        setup_race_tab(app.clone());
        setup_tabs(app.clone());

        {
            let app = app.clone();
            if let Some(window) = web_sys::window() {
                on_event(&window, "resize", move |_| redraw_all(&app));
            }
        }

        refresh_race(&app);
        redraw_all(&app);

        log::info!("Inertia Lab running");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::DVec2;
    use inertia_lab::sim::{geometry, Race};

    env_logger::init();
    log::info!("Inertia Lab (native) starting...");
    log::info!("The interactive canvases need a browser - see the web build");

    // Smoke demo: a unit square and the default three-body race
    let square = [
        DVec2::new(0.0, 0.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(1.0, 1.0),
        DVec2::new(0.0, 1.0),
    ];
    match geometry::section_properties(&square) {
        Some(props) => {
            println!(
                "Unit square: area = {:.3}, centroid = ({:.3}, {:.3}), Ix_c = {:.5}, Iz_origin = {:.5}",
                props.area, props.centroid.x, props.centroid.y, props.ix_centroid, props.iz_origin
            );
        }
        None => println!("degenerate polygon"),
    }

    let mut race = Race::new();
    race.add_participant(None, None);
    race.add_participant(None, None);
    race.add_participant(None, None);
    println!(
        "\nRamp race ({} m at {} deg):",
        race.ramp.length, race.ramp.angle_degrees
    );
    for (rank, entry) in race.standings().iter().enumerate() {
        let name = race
            .participant(entry.participant_id)
            .map(|p| p.name.as_str())
            .unwrap_or("?");
        println!(
            "  {}. {name}: a = {:.2} m/s^2, t = {:.3} s, v = {:.2} m/s",
            rank + 1,
            entry.acceleration,
            entry.finish_time,
            entry.final_velocity
        );
    }
}
