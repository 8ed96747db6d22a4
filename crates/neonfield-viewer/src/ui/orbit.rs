use bevy::prelude::{EventWriter, ResMut};
use bevy_egui::{egui, EguiContexts};

use crate::app::events::ViewSwitched;
use crate::scene::SceneState;
use crate::util::config::ViewMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitItem {
    View(ViewMode),
    Settings,
}

impl OrbitItem {
    pub fn at(index: usize) -> Self {
        ViewMode::ALL
            .get(index)
            .copied()
            .map(OrbitItem::View)
            .unwrap_or(OrbitItem::Settings)
    }

    pub fn label(self) -> &'static str {
        match self {
            OrbitItem::View(mode) => mode.label(),
            OrbitItem::Settings => "Settings",
        }
    }
}

/// Buttons riding the orbit ring; hovering any of them slows the ring down.
pub fn orbit_menu(
    mut contexts: EguiContexts,
    mut st: ResMut<SceneState>,
    mut switched: EventWriter<ViewSwitched>,
) {
    if !st.ui.show_orbit {
        st.orbit.set_hovered(false);
        return;
    }
    let ctx = contexts.ctx_mut();
    let mut hovered = false;

    for (i, p) in st.orbit.positions().into_iter().enumerate() {
        let item = OrbitItem::at(i);
        let selected = match item {
            OrbitItem::View(mode) => mode == st.ui.view_mode,
            OrbitItem::Settings => st.ui.show_panel,
        };
        let resp = egui::Area::new(egui::Id::new(("orbiter", i)))
            .order(egui::Order::Middle)
            .pivot(egui::Align2::CENTER_CENTER)
            .fixed_pos(egui::pos2(p.x, p.y))
            .show(ctx, |ui| {
                ui.add(egui::Button::new(item.label()).selected(selected))
            })
            .inner;

        hovered |= resp.hovered();
        if resp.clicked() {
            match item {
                OrbitItem::View(mode) => {
                    switched.send(ViewSwitched(mode));
                }
                OrbitItem::Settings => st.ui.show_panel = !st.ui.show_panel,
            }
        }
    }

    st.orbit.set_hovered(hovered);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ORBIT_ITEMS;

    #[test]
    fn every_view_has_an_orbiter_and_settings_comes_last() {
        let items: Vec<OrbitItem> = (0..ORBIT_ITEMS).map(OrbitItem::at).collect();
        for mode in ViewMode::ALL {
            assert!(items.contains(&OrbitItem::View(mode)));
        }
        assert_eq!(items.last(), Some(&OrbitItem::Settings));
    }
}
