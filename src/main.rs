//! Civic Games entry point
//!
//! Binds the engine to the host page and runs the timer/render loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, DragEvent, Element, PointerEvent};

    use civic_games::Tuning;
    use civic_games::engine::catalog;
    use civic_games::engine::{CardSort, GameId, SceneController, Session};
    use civic_games::platform::classes;
    use civic_games::platform::dom::{self, DomGeometry};

    /// Where a pointer event is routed
    #[derive(Debug, Clone, Copy)]
    enum Slot {
        /// A game on its own screen
        Screen(GameId),
        /// A game behind the civic-scenes tabs
        Scene(GameId),
    }

    /// Page-wide state holding every controller
    struct App {
        geometry: DomGeometry,
        session: Session,
        /// Standalone screens; only the opened one is live
        games: SceneController,
        scenes: SceneController,
        signs: CardSort,
        kit: CardSort,
    }

    impl App {
        fn new(document: Document, tuning: &Tuning) -> Self {
            let geometry = DomGeometry::new(document);
            let games = SceneController::new(catalog::standalone_games(tuning, &geometry));
            let scenes = catalog::civic_scenes(tuning, &geometry);
            Self {
                geometry,
                session: Session::new(),
                games,
                scenes,
                signs: CardSort::sign_match(tuning.card_sort_required, tuning.points_per_success),
                kit: CardSort::safety_kit(tuning.card_sort_required, tuning.points_per_success),
            }
        }

        fn document(&self) -> &Document {
            self.geometry.document()
        }

        fn is_playable(&self, slot: Slot) -> bool {
            let game = match slot {
                Slot::Screen(id) => self.games.scene(id),
                Slot::Scene(id) => self.scenes.scene(id),
            };
            game.is_some_and(|g| !g.is_inert())
        }

        fn pointer_down(&mut self, slot: Slot, pointer_id: i32, pointer: Vec2) -> bool {
            let geometry = &self.geometry;
            match slot {
                Slot::Screen(id) => self.games.pointer_down(id, pointer_id, pointer, geometry),
                Slot::Scene(id) => self.scenes.pointer_down(id, pointer_id, pointer, geometry),
            }
        }

        fn pointer_move(&mut self, slot: Slot, pointer_id: i32, pointer: Vec2) {
            let geometry = &self.geometry;
            let sink = &mut self.session;
            match slot {
                Slot::Screen(id) => self.games.pointer_move(id, pointer_id, pointer, geometry, sink),
                Slot::Scene(id) => self.scenes.pointer_move(id, pointer_id, pointer, geometry, sink),
            };
        }

        /// Pointer-up and pointer-cancel share this path
        fn pointer_release(&mut self, slot: Slot, pointer_id: i32) {
            let geometry = &self.geometry;
            let sink = &mut self.session;
            match slot {
                Slot::Screen(id) => self.games.pointer_up(id, pointer_id, geometry, sink),
                Slot::Scene(id) => self.scenes.pointer_up(id, pointer_id, geometry, sink),
            };
        }

        fn slider(&mut self, id: GameId, value: f32) {
            self.scenes
                .set_value(id, value, &self.geometry, &mut self.session);
        }

        fn drop_card(&mut self, sort: &str, card_id: &str, card_key: &str, zone_key: &str) {
            let game = match sort {
                "sign-match" => &mut self.signs,
                "safety-kit" => &mut self.kit,
                _ => return,
            };
            game.drop_card(card_id, card_key, zone_key, &mut self.session);
        }

        /// Poll fail-timers. Only the opened screen and visible scene are live.
        fn tick(&mut self, now: f64) {
            self.games.poll(now, &mut self.session);
            self.scenes.poll(now, &mut self.session);
        }

        fn render(&self) {
            let document = self.document();
            let games = catalog::STANDALONE.iter().filter_map(|id| self.games.scene(*id));
            let scenes = catalog::CIVIC_SCENES.iter().filter_map(|id| self.scenes.scene(*id));
            for game in games.chain(scenes) {
                if let Some(view) = game.view() {
                    dom::apply_view(document, game.spec(), &view);
                }
            }

            dom::set_text(document, "score-value", &self.session.total_score.to_string());
            match &self.session.feedback {
                Some(message) => {
                    dom::set_text(document, "feedback-text", message);
                    dom::set_hidden(document, "feedback", false);
                }
                None => dom::set_hidden(document, "feedback", true),
            }
        }

        /// Open (or replay) a standalone game; its round and timer start now
        fn show_game(&mut self, id: GameId, now: f64) {
            if !self.games.switch_scene(id, now) {
                return;
            }
            self.session.clear_feedback();
            let document = self.document();
            for other in catalog::STANDALONE {
                dom::set_hidden(document, &format!("screen-{}", other.as_str()), other != id);
            }
        }

        /// Leave the standalone screens; nothing there stays live
        fn close_games(&mut self) {
            self.games.deactivate_all();
            let document = self.document();
            for id in catalog::STANDALONE {
                dom::set_hidden(document, &format!("screen-{}", id.as_str()), true);
            }
        }

        fn show_scene(&mut self, id: GameId, now: f64) {
            if !self.scenes.switch_scene(id, now) {
                return;
            }
            self.session.clear_feedback();
            let document = self.document();
            for other in catalog::CIVIC_SCENES {
                let visible = other == id;
                dom::set_hidden(document, &format!("scene-{}", other.as_str()), !visible);
            }
            if let Ok(tabs) = document.query_selector_all("[data-scene]") {
                for i in 0..tabs.length() {
                    let Some(tab) = tabs.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                        continue;
                    };
                    let selected = tab.get_attribute("data-scene").as_deref() == Some(id.as_str());
                    dom::toggle_class(&tab, classes::ACTIVE, selected);
                }
            }
        }

        fn reset_scene(&mut self, now: f64) {
            self.scenes.reset_active(now);
            self.session.clear_feedback();
        }

        /// Start a round of `id`, whichever group it belongs to
        fn play(&mut self, id: GameId, now: f64) {
            if catalog::CIVIC_SCENES.contains(&id) {
                self.show_scene(id, now);
            } else {
                self.show_game(id, now);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Civic Games starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let tuning = Tuning::load();
        let app = Rc::new(RefCell::new(App::new(document.clone(), &tuning)));

        // Standalone games stay idle until their screen is opened
        if let Some(first) = catalog::CIVIC_SCENES.first() {
            app.borrow_mut().show_scene(*first, dom::now());
        }

        for id in catalog::STANDALONE.into_iter().chain(catalog::CIVIC_SCENES) {
            let spec = catalog::spec_for(id, &tuning);
            let slot = if catalog::STANDALONE.contains(&id) {
                Slot::Screen(id)
            } else {
                Slot::Scene(id)
            };
            if !app.borrow().is_playable(slot) {
                continue;
            }
            match spec.container {
                Some(_) => setup_pointer_handlers(&document, spec.entity, slot, app.clone()),
                None => setup_slider(&document, spec.entity, id, app.clone()),
            }
        }

        setup_scene_tabs(&document, app.clone());
        setup_play_buttons(&document, app.clone());
        setup_card_sort(&document, app.clone());

        app.borrow().render();
        request_animation_frame(app);

        log::info!("Civic Games running!");
    }

    fn setup_pointer_handlers(
        document: &Document,
        entity: &str,
        slot: Slot,
        app: Rc<RefCell<App>>,
    ) {
        let Some(el) = document.get_element_by_id(entity) else {
            return;
        };

        // Pointer down - capture so move/up keep coming while outside the entity
        {
            let app = app.clone();
            let el_clone = el.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let pointer = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                let mut a = app.borrow_mut();
                if a.pointer_down(slot, event.pointer_id(), pointer) {
                    let _ = el_clone.set_pointer_capture(event.pointer_id());
                    a.render();
                }
            });
            let _ = el.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer move
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let pointer = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                let mut a = app.borrow_mut();
                a.pointer_move(slot, event.pointer_id(), pointer);
                a.render();
            });
            let _ = el.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer up / cancel
        for kind in ["pointerup", "pointercancel"] {
            let app = app.clone();
            let el_clone = el.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let _ = el_clone.release_pointer_capture(event.pointer_id());
                let mut a = app.borrow_mut();
                a.pointer_release(slot, event.pointer_id());
                a.render();
            });
            let _ = el.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_slider(document: &Document, entity: &str, id: GameId, app: Rc<RefCell<App>>) {
        let Some(el) = document.get_element_by_id(entity) else {
            return;
        };
        let Ok(input) = el.dyn_into::<web_sys::HtmlInputElement>() else {
            log::warn!("{}: '{}' is not an input", id.as_str(), entity);
            return;
        };

        let input_clone = input.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Ok(value) = input_clone.value().parse::<f32>() else {
                return;
            };
            let mut a = app.borrow_mut();
            a.slider(id, value);
            a.render();
        });
        let _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_scene_tabs(document: &Document, app: Rc<RefCell<App>>) {
        let Ok(tabs) = document.query_selector_all("[data-scene]") else {
            return;
        };
        for i in 0..tabs.length() {
            let Some(tab) = tabs.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(id) = tab.get_attribute("data-scene").and_then(|s| GameId::from_str(&s)) else {
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                a.show_scene(id, dom::now());
                a.render();
            });
            let _ = tab.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Click handler for every element matching `selector`
    fn on_click_all(
        document: &Document,
        selector: &str,
        mut handler: impl FnMut(&Element) -> Option<Box<dyn FnMut(&mut App)>>,
        app: Rc<RefCell<App>>,
    ) {
        let Ok(nodes) = document.query_selector_all(selector) else {
            return;
        };
        for i in 0..nodes.length() {
            let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(mut action) = handler(&el) else {
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                action(&mut *a);
                a.render();
            });
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_play_buttons(document: &Document, app: Rc<RefCell<App>>) {
        // Reset whichever civic scene is visible
        on_click_all(
            document,
            "#civic-reset",
            |_| Some(Box::new(|a: &mut App| a.reset_scene(dom::now()))),
            app.clone(),
        );

        // Open or replay a game: <button data-play="flyer">, <button data-reset="crosswalk">
        for attr in ["data-play", "data-reset"] {
            on_click_all(
                document,
                &format!("[{}]", attr),
                |el| {
                    let id = el.get_attribute(attr).and_then(|s| GameId::from_str(&s))?;
                    Some(Box::new(move |a: &mut App| a.play(id, dom::now())))
                },
                app.clone(),
            );
        }

        // Back out of the standalone screens: <button data-leave>
        on_click_all(
            document,
            "[data-leave]",
            |_| Some(Box::new(|a: &mut App| a.close_games())),
            app,
        );
    }

    /// HTML5 drag-and-drop for the card-sort sub-games.
    ///
    /// Cards: `<div draggable="true" data-card="helmet" data-key="kit">`
    /// Zones: `<div data-zone="kit" data-sort="safety-kit">`
    fn setup_card_sort(document: &Document, app: Rc<RefCell<App>>) {
        if let Ok(cards) = document.query_selector_all("[data-card]") {
            for i in 0..cards.length() {
                let Some(card) = cards.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                    continue;
                };
                let card_id = card.get_attribute("data-card").unwrap_or_default();
                let card_key = card.get_attribute("data-key").unwrap_or_default();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: DragEvent| {
                    if let Some(data) = event.data_transfer() {
                        let _ = data.set_data("text/plain", &format!("{}|{}", card_id, card_key));
                    }
                });
                let _ = card.add_event_listener_with_callback("dragstart", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        let Ok(zones) = document.query_selector_all("[data-zone]") else {
            return;
        };
        for i in 0..zones.length() {
            let Some(zone) = zones.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let zone_key = zone.get_attribute("data-zone").unwrap_or_default();
            let sort = zone.get_attribute("data-sort").unwrap_or_default();

            // Allow dropping
            {
                let closure = Closure::<dyn FnMut(_)>::new(move |event: DragEvent| {
                    event.prevent_default();
                });
                let _ = zone.add_event_listener_with_callback("dragover", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: DragEvent| {
                event.prevent_default();
                let Some(payload) = event.data_transfer().and_then(|d| d.get_data("text/plain").ok()) else {
                    return;
                };
                let Some((card_id, card_key)) = payload.split_once('|') else {
                    return;
                };
                let mut a = app.borrow_mut();
                a.drop_card(&sort, card_id, card_key, &zone_key);
                a.render();
            });
            let _ = zone.add_event_listener_with_callback("drop", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.tick(time);
            a.render();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Civic Games (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted play-through against synthetic geometry
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use civic_games::Tuning;
    use civic_games::engine::catalog;
    use civic_games::engine::{GameController, GameId, Rect, Session, StaticLayout};
    use glam::Vec2;

    pub fn run() {
        let tuning = Tuning::load();
        let layout = StaticLayout::new()
            .with("playground", Rect::new(0.0, 0.0, 600.0, 400.0))
            .with("character", Rect::new(80.0, 120.0, 40.0, 40.0))
            .with("crosswalk", Rect::new(0.0, 250.0, 600.0, 60.0))
            .with("karaoke-volume", Rect::new(0.0, 500.0, 200.0, 20.0))
            .with("kitchen", Rect::new(0.0, 600.0, 400.0, 200.0))
            .with("pot-lid", Rect::new(300.0, 620.0, 80.0, 20.0))
            .with("pot-area", Rect::new(40.0, 660.0, 120.0, 100.0));
        let mut session = Session::new();

        // Crosswalk: drag onto the stripes and let go
        let mut crosswalk = GameController::bind(catalog::crosswalk(&tuning), &layout);
        crosswalk.reset(0.0);
        crosswalk.pointer_down(1, Vec2::new(100.0, 140.0), &layout);
        crosswalk.pointer_move(1, Vec2::new(300.0, 280.0), &layout, &mut session);
        let outcome = crosswalk.pointer_up(1, &layout, &mut session);
        log::info!("crosswalk -> {:?}", outcome);

        // Civic scenes: karaoke wins, pot lid is abandoned mid-timer
        let mut scenes = catalog::civic_scenes(&tuning, &layout);
        scenes.switch_scene(GameId::PotLid, 0.0);
        scenes.switch_scene(GameId::Karaoke, 1000.0);
        let outcome = scenes.set_value(GameId::Karaoke, 15.0, &layout, &mut session);
        log::info!("karaoke -> {:?}", outcome);
        let late = scenes.poll(60_000.0, &mut session);
        log::info!("late poll -> {:?}", late);

        log::info!(
            "score {} | feedback {:?}",
            session.total_score,
            session.feedback.as_deref().unwrap_or("")
        );
    }
}
