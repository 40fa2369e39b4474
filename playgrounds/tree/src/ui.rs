use bevy::prelude::*;
use morph_tree::Mode;

const GOLD: Color = Color::srgb(1.0, 0.843, 0.0);
const IDLE_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.3);

/// Current target shape, written by the buttons and keyboard, read once per frame.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeController {
	pub mode: Mode,
}

impl ModeController {
	pub fn new(mode: Mode) -> Self {
		Self { mode }
	}

	pub fn switch_to(&mut self, mode: Mode) {
		if self.mode != mode {
			log::debug!("Switching tree mode from {:?} to {:?}", self.mode, mode);
			self.mode = mode;
		}
	}
}

#[derive(Component)]
pub struct ModeButton(pub Mode);

fn label(mode: Mode) -> &'static str {
	match mode {
		Mode::Scattered => "SCATTER",
		Mode::Assembled => "GATHER",
	}
}

fn button_colors(active: bool) -> (Color, Color) {
	if active {
		(GOLD, Color::BLACK)
	} else {
		(IDLE_BACKGROUND, GOLD)
	}
}

pub fn setup_mode_buttons(mut commands: Commands, mode: Res<ModeController>) {
	log::info!("Setting up mode buttons");

	commands
		.spawn(Node {
			position_type: PositionType::Absolute,
			bottom: Val::Px(48.0),
			width: Val::Percent(100.0),
			justify_content: JustifyContent::Center,
			column_gap: Val::Px(32.0),
			..default()
		})
		.with_children(|parent| {
			for button_mode in [Mode::Scattered, Mode::Assembled] {
				let (background, text) = button_colors(button_mode == mode.mode);
				parent
					.spawn((
						Button,
						Node { padding: UiRect::axes(Val::Px(32.0), Val::Px(12.0)), ..default() },
						BackgroundColor(background),
						ModeButton(button_mode),
					))
					.with_children(|button| {
						button.spawn((
							Text::new(label(button_mode)),
							TextFont { font_size: 16.0, ..default() },
							TextColor(text),
						));
					});
			}
		});
}

pub fn handle_mode_buttons(
	interactions: Query<(&Interaction, &ModeButton), Changed<Interaction>>,
	mut mode: ResMut<ModeController>,
) {
	for (interaction, button) in &interactions {
		if *interaction == Interaction::Pressed {
			mode.switch_to(button.0);
		}
	}
}

/// `S` scatters, `G` gathers, `Space` toggles.
pub fn handle_mode_keys(
	keyboard_input: Res<ButtonInput<KeyCode>>,
	mut mode: ResMut<ModeController>,
) {
	if keyboard_input.just_pressed(KeyCode::KeyS) {
		mode.switch_to(Mode::Scattered);
	}
	if keyboard_input.just_pressed(KeyCode::KeyG) {
		mode.switch_to(Mode::Assembled);
	}
	if keyboard_input.just_pressed(KeyCode::Space) {
		let toggled = mode.mode.toggled();
		mode.switch_to(toggled);
	}
}

pub fn update_button_styles(
	mode: Res<ModeController>,
	mut buttons: Query<(&ModeButton, &mut BackgroundColor, &Children)>,
	mut texts: Query<&mut TextColor>,
) {
	if !mode.is_changed() {
		return;
	}

	for (button, mut background, children) in &mut buttons {
		let (fill, text) = button_colors(button.0 == mode.mode);
		background.0 = fill;
		for &child in &**children {
			if let Ok(mut color) = texts.get_mut(child) {
				color.0 = text;
			}
		}
	}
}
