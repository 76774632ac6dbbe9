use crate::brush::Brush;
use crate::client::InkModuleClient;
use crate::command::{Commands, DiscardedDrawCommands, UndoRedoModel};
use crate::engine::StrokeEngine;
use crate::error::{MessageError, SettingsError};
use crate::geometry::{Affine, render_transform, to_canonical_position};
use crate::id_generator::{StrokeId, StrokeIdGenerator};
use crate::input::InputEvent;
use crate::message::{Message, ToolSelection};
use crate::renderer::PolylineEngine;
use crate::settings::InkSettings;
use crate::stroke::FinishedStroke;
use crate::tool::{BrushTool, ToolState};
use egui::{PointerButton, Pos2, Rect, Vec2};
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// Input positions of each stroke, grouped by page.
pub type PageStrokePositions = BTreeMap<usize, Vec<Vec<Pos2>>>;

fn canonical_position<C: InkModuleClient>(client: &C, position: Pos2, page_index: usize) -> Pos2 {
    to_canonical_position(
        position,
        client.orientation(),
        client.page_contents_rect(page_index),
        client.zoom(),
    )
}

fn page_transform<C: InkModuleClient>(client: &C, page_index: usize) -> Affine {
    render_transform(
        client.viewport_origin_offset(),
        client.orientation(),
        client.page_contents_rect(page_index),
        client.zoom(),
    )
}

fn union(accumulated: Option<Rect>, rect: Rect) -> Option<Rect> {
    Some(accumulated.map_or(rect, |accumulated| accumulated.union(rect)))
}

/// Ink annotations for a paged document: captures pen, highlighter and
/// eraser gestures, keeps the finished strokes of every page and their
/// undo/redo history, and draws them.
///
/// All methods expect to be called from one thread, in event order.
pub struct InkModule<C: InkModuleClient, E: StrokeEngine = PolylineEngine> {
    client: C,
    engine: E,
    enabled: bool,
    tool: ToolState,
    strokes: BTreeMap<usize, Vec<FinishedStroke<E::Shape>>>,
    undo_redo: UndoRedoModel,
    id_generator: StrokeIdGenerator,
}

impl<C: InkModuleClient, E: StrokeEngine> std::fmt::Debug for InkModule<C, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InkModule")
            .field("enabled", &self.enabled)
            .field("tool", &self.tool)
            .field("strokes", &format!("<{} strokes>", self.stroke_count()))
            .field("undo_redo", &self.undo_redo)
            .field("id_generator", &self.id_generator)
            .finish()
    }
}

impl<C: InkModuleClient> InkModule<C> {
    /// Creates a module with default settings and the bundled polyline engine.
    pub fn new(client: C) -> Self {
        Self::from_valid_settings(client, PolylineEngine::new(), InkSettings::default())
    }
}

impl<C: InkModuleClient, E: StrokeEngine> InkModule<C, E> {
    /// Creates a module drawing with `engine`, after checking `settings`.
    pub fn with_engine(
        client: C,
        engine: E,
        settings: InkSettings,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::from_valid_settings(client, engine, settings))
    }

    fn from_valid_settings(client: C, engine: E, settings: InkSettings) -> Self {
        Self {
            client,
            engine,
            enabled: settings.annotation_mode_enabled,
            tool: ToolState::Drawing(BrushTool::new(settings.initial_brush())),
            strokes: BTreeMap::new(),
            undo_redo: UndoRedoModel::new(),
            id_generator: StrokeIdGenerator::new(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }

    /// Whether annotation mode is on, i.e. pointer events are consumed.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn tool(&self) -> &ToolState {
        &self.tool
    }

    /// The pen or highlighter, unless the eraser is selected.
    pub fn current_brush(&self) -> Option<&Brush> {
        match &self.tool {
            ToolState::Drawing(tool) => Some(tool.brush()),
            ToolState::Erasing(_) => None,
        }
    }

    pub fn eraser_size(&self) -> Option<f32> {
        match &self.tool {
            ToolState::Drawing(_) => None,
            ToolState::Erasing(tool) => Some(tool.size()),
        }
    }

    pub fn is_drawing_stroke(&self) -> bool {
        matches!(self.tool, ToolState::Drawing(_)) && self.tool.is_active()
    }

    pub fn is_erasing_stroke(&self) -> bool {
        matches!(self.tool, ToolState::Erasing(_)) && self.tool.is_active()
    }

    pub fn undo_redo_model(&self) -> &UndoRedoModel {
        &self.undo_redo
    }

    /// Finished strokes of `page_index`, in id order, hidden ones included.
    pub fn page_strokes(&self, page_index: usize) -> &[FinishedStroke<E::Shape>] {
        self.strokes
            .get(&page_index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of finished strokes, hidden ones included.
    pub fn stroke_count(&self) -> usize {
        self.strokes.values().map(Vec::len).sum()
    }

    /// Input positions of every finished stroke, hidden ones included.
    pub fn strokes_input_positions(&self) -> PageStrokePositions {
        self.collect_positions(|_| true)
    }

    /// Input positions of the strokes that are drawn.
    pub fn visible_strokes_input_positions(&self) -> PageStrokePositions {
        self.collect_positions(FinishedStroke::should_draw)
    }

    fn collect_positions(
        &self,
        filter: impl Fn(&FinishedStroke<E::Shape>) -> bool,
    ) -> PageStrokePositions {
        self.strokes
            .iter()
            .filter_map(|(&page_index, page_strokes)| {
                let positions: Vec<Vec<Pos2>> = page_strokes
                    .iter()
                    .filter(|stroke| filter(stroke))
                    .map(FinishedStroke::positions)
                    .collect();
                (!positions.is_empty()).then_some((page_index, positions))
            })
            .collect()
    }

    /// Draws every visible stroke, then the stroke being drawn, if any.
    pub fn draw(&self, canvas: &mut E::Canvas) {
        for (&page_index, page_strokes) in &self.strokes {
            if !self.client.is_page_visible(page_index) {
                continue;
            }
            let transform = page_transform(&self.client, page_index);
            for stroke in page_strokes.iter().filter(|stroke| stroke.should_draw()) {
                self.engine.render(stroke.shape(), &transform, canvas);
            }
        }

        let ToolState::Drawing(tool) = &self.tool else {
            return;
        };
        let Some(stroke) = tool.current_stroke() else {
            return;
        };
        let transform = page_transform(&self.client, stroke.page_index());
        for inputs in stroke.non_empty_segments() {
            let shape = self.engine.build_stroke(tool.brush(), inputs);
            self.engine.render(&shape, &transform, canvas);
        }
    }

    /// Handles a pointer event. Returns whether the event was consumed.
    pub fn handle_input_event(&mut self, event: &InputEvent) -> bool {
        if !self.enabled {
            return false;
        }

        match *event {
            InputEvent::PointerDown {
                position,
                button,
                time,
            } => button == PointerButton::Primary && self.on_pointer_down(position, time),
            InputEvent::PointerMove { position, time } => self.on_pointer_move(position, time),
            InputEvent::PointerUp { button, .. } => {
                button == PointerButton::Primary && self.on_pointer_up()
            }
        }
    }

    /// Handles a host message. Returns `Ok(false)` for messages meant for
    /// someone else.
    pub fn on_message(&mut self, message: &Value) -> Result<bool, MessageError> {
        let message = match Message::decode(message) {
            Ok(Some(message)) => message,
            Ok(None) => return Ok(false),
            Err(err) => {
                log::warn!("Rejected annotation message: {err}");
                return Err(err);
            }
        };

        match message {
            Message::SetAnnotationMode { enable } => self.set_annotation_mode(enable),
            Message::SetAnnotationBrush(selection) => self.set_tool(selection),
            Message::AnnotationUndo => self.undo(),
            Message::AnnotationRedo => self.redo(),
            Message::GetAnnotationBrush { message_id } => self.reply_annotation_brush(message_id),
        }
        Ok(true)
    }

    pub fn set_annotation_mode(&mut self, enable: bool) {
        if self.enabled == enable {
            return;
        }
        if !enable {
            self.finish_active_gesture();
        }
        self.enabled = enable;
        log::debug!("Annotation mode {}", if enable { "enabled" } else { "disabled" });
        self.client.on_annotation_mode_toggled(enable);
    }

    /// Replaces the current tool. A gesture in progress is finished first.
    pub fn set_tool(&mut self, selection: ToolSelection) {
        self.finish_active_gesture();
        self.tool = ToolState::from(selection);
        log::debug!("Selected tool: {}", self.tool.name());
    }

    pub fn undo(&mut self) {
        let commands = self.undo_redo.undo();
        if commands.is_none() {
            log::trace!("Nothing to undo");
            return;
        }
        log::trace!("Undo: {commands:?}");
        self.apply_undo_redo_commands(commands);
    }

    pub fn redo(&mut self) {
        let commands = self.undo_redo.redo();
        if commands.is_none() {
            log::trace!("Nothing to redo");
            return;
        }
        log::trace!("Redo: {commands:?}");
        self.apply_undo_redo_commands(commands);
    }

    fn reply_annotation_brush(&mut self, message_id: String) {
        let data = match &self.tool {
            ToolState::Drawing(tool) => {
                let brush = tool.brush();
                let color = brush.color();
                json!({
                    "type": brush.brush_type().name(),
                    "size": brush.size(),
                    "color": {"r": color.r(), "g": color.g(), "b": color.b()},
                })
            }
            ToolState::Erasing(tool) => json!({"type": "eraser", "size": tool.size()}),
        };
        self.client.post_message(json!({
            "type": "getAnnotationBrushReply",
            "messageId": message_id,
            "data": data,
        }));
    }

    fn finish_active_gesture(&mut self) {
        if !self.tool.is_active() {
            return;
        }
        match self.tool {
            ToolState::Drawing(_) => {
                self.finish_stroke();
            }
            ToolState::Erasing(_) => {
                self.finish_erase_stroke();
            }
        }
    }

    fn on_pointer_down(&mut self, position: Pos2, time: f64) -> bool {
        match self.tool {
            ToolState::Drawing(_) => self.start_stroke(position, time),
            ToolState::Erasing(_) => self.start_erase_stroke(position),
        }
    }

    fn on_pointer_move(&mut self, position: Pos2, time: f64) -> bool {
        match self.tool {
            ToolState::Drawing(_) => self.continue_stroke(position, time),
            ToolState::Erasing(_) => self.continue_erase_stroke(position),
        }
    }

    fn on_pointer_up(&mut self) -> bool {
        match self.tool {
            ToolState::Drawing(_) => self.finish_stroke(),
            ToolState::Erasing(_) => self.finish_erase_stroke(),
        }
    }

    fn start_stroke(&mut self, position: Pos2, time: f64) -> bool {
        let ToolState::Drawing(tool) = &mut self.tool else {
            return false;
        };
        if tool.current_stroke().is_some() {
            return false;
        }
        let Some(page_index) = self.client.visible_page_index_from_point(position) else {
            return false;
        };

        let canonical = canonical_position(&self.client, position, page_index);
        tool.start_stroke(page_index, time, position, canonical);
        self.client.invalidate(tool.brush().invalidate_area(position, position));
        log::trace!("Started stroke on page {page_index} at {canonical:?}");

        let discarded = self.undo_redo.start_draw();
        self.apply_discards(&discarded);
        true
    }

    fn continue_stroke(&mut self, position: Pos2, time: f64) -> bool {
        let ToolState::Drawing(tool) = &mut self.tool else {
            return false;
        };
        let Some(stroke) = tool.current_stroke_mut() else {
            return false;
        };

        let page_index = stroke.page_index();
        if self.client.visible_page_index_from_point(position) != Some(page_index) {
            stroke.leave_page();
            return true;
        }

        let canonical = canonical_position(&self.client, position, page_index);
        let previous = stroke.add_point(position, canonical, time);
        self.client.invalidate(tool.brush().invalidate_area(previous, position));
        true
    }

    fn finish_stroke(&mut self) -> bool {
        let ToolState::Drawing(tool) = &mut self.tool else {
            return false;
        };
        let Some(stroke) = tool.take_stroke() else {
            return false;
        };

        let page_index = stroke.page_index();
        for inputs in stroke.into_segments().into_iter().filter(|inputs| !inputs.is_empty()) {
            let shape = self.engine.build_stroke(tool.brush(), &inputs);
            let id = self.id_generator.get_id_and_advance();
            self.undo_redo.draw(id);
            self.client.stroke_added(page_index, id, &inputs);
            self.strokes
                .entry(page_index)
                .or_default()
                .push(FinishedStroke::new(id, inputs, shape));
            log::debug!("Added stroke {id} to page {page_index}");
        }
        self.undo_redo.finish_draw();
        self.client.stroke_finished();
        true
    }

    fn start_erase_stroke(&mut self, position: Pos2) -> bool {
        let ToolState::Erasing(tool) = &mut self.tool else {
            return false;
        };
        if tool.is_erasing() {
            return false;
        }
        let Some(page_index) = self.client.visible_page_index_from_point(position) else {
            return false;
        };

        tool.start_erasing();
        let discarded = self.undo_redo.start_erase();
        self.apply_discards(&discarded);
        self.erase_at(position, page_index);
        true
    }

    fn continue_erase_stroke(&mut self, position: Pos2) -> bool {
        if !self.is_erasing_stroke() {
            return false;
        }
        // Off-page movement is still part of the gesture.
        if let Some(page_index) = self.client.visible_page_index_from_point(position) {
            self.erase_at(position, page_index);
        }
        true
    }

    fn finish_erase_stroke(&mut self) -> bool {
        let ToolState::Erasing(tool) = &mut self.tool else {
            return false;
        };
        if !tool.is_erasing() {
            return false;
        }

        let did_erase_any = tool.finish_erasing();
        self.undo_redo.finish_erase();
        if did_erase_any {
            self.client.stroke_finished();
        }
        true
    }

    /// Hides every drawn stroke on `page_index` touching the eraser square
    /// centered on `position`.
    fn erase_at(&mut self, position: Pos2, page_index: usize) {
        let ToolState::Erasing(tool) = &mut self.tool else {
            return;
        };
        let Some(page_strokes) = self.strokes.get_mut(&page_index) else {
            return;
        };

        let canonical = canonical_position(&self.client, position, page_index);
        let eraser_rect = Rect::from_center_size(canonical, Vec2::splat(2.0 * tool.size()));
        let transform = page_transform(&self.client, page_index);

        let mut invalidate_rect = None;
        for stroke in page_strokes.iter_mut().filter(|stroke| stroke.should_draw) {
            // The eraser rect is already in canonical space.
            if !self
                .engine
                .intersects_rect(eraser_rect, stroke.shape(), &Affine::IDENTITY)
            {
                continue;
            }

            stroke.should_draw = false;
            tool.mark_erased();
            self.undo_redo.erase(stroke.id());
            self.client.update_stroke_active(page_index, stroke.id(), false);
            let bounds = transform.transform_rect(self.engine.bounds(stroke.shape()));
            invalidate_rect = union(invalidate_rect, bounds);
            log::debug!("Erased stroke {} on page {page_index}", stroke.id());
        }

        if let Some(rect) = invalidate_rect {
            self.client.invalidate(rect);
        }
    }

    fn apply_undo_redo_commands(&mut self, commands: Commands) {
        let (ids, should_draw) = match commands {
            Commands::None => return,
            Commands::Draw(ids) => (ids, true),
            Commands::Erase(ids) => (ids, false),
        };

        let mut invalidate_rect = None;
        for (&page_index, page_strokes) in &mut self.strokes {
            let transform = self
                .client
                .is_page_visible(page_index)
                .then(|| page_transform(&self.client, page_index));
            for stroke in page_strokes.iter_mut().filter(|stroke| ids.contains(&stroke.id())) {
                debug_assert_ne!(stroke.should_draw, should_draw, "stroke {}", stroke.id());
                stroke.should_draw = should_draw;
                self.client.update_stroke_active(page_index, stroke.id(), should_draw);
                if let Some(transform) = &transform {
                    let bounds = transform.transform_rect(self.engine.bounds(stroke.shape()));
                    invalidate_rect = union(invalidate_rect, bounds);
                }
            }
        }

        if let Some(rect) = invalidate_rect {
            self.client.invalidate(rect);
        }
    }

    /// Deletes strokes whose history was discarded and reclaims their ids.
    fn apply_discards(&mut self, discarded: &DiscardedDrawCommands) {
        // Discarded draws are always the newest, so their ids are the top of
        // the range on every page.
        let Some(&first_id) = discarded.first() else {
            return;
        };

        for (&page_index, page_strokes) in &mut self.strokes {
            let start = page_strokes.partition_point(|stroke| stroke.id() < first_id);
            for stroke in page_strokes.drain(start..) {
                debug_assert!(discarded.contains(&stroke.id()), "stroke {}", stroke.id());
                self.client.discard_stroke(page_index, stroke.id());
            }
        }
        self.strokes.retain(|_, page_strokes| !page_strokes.is_empty());

        log::debug!("Discarded {} strokes, next id is {first_id}", discarded.len());
        self.id_generator.reset_id_to(first_id);
    }

    /// Id the next finished stroke will get.
    pub fn next_stroke_id(&self) -> StrokeId {
        self.id_generator.peek_next_id()
    }
}
