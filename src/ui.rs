//! UI layer - buttons built from the configuration

use sheen_ui::{ButtonArgs, Disabled, ImageResource};

use crate::config::{ButtonConfig, ConfigError, DisabledConfig, GridConfig};

/// Create button arguments from configuration, filling free grid slots
/// for buttons without a position
pub fn create_buttons_from_config(
    configs: &[ButtonConfig],
    grid: &GridConfig,
    canvas_size: [u32; 2],
) -> Result<Vec<ButtonArgs>, ConfigError> {
    let mut slots = grid.positions(canvas_size[0] as i32, canvas_size[1] as i32);

    configs
        .iter()
        .map(|cfg| {
            let [x, y] = match cfg.position {
                Some(position) => position,
                None => slots.next().unwrap_or_else(|| {
                    log::warn!("Grid is full, stacking {:?} at the origin", cfg.name);
                    [grid.padding, grid.padding]
                }),
            };
            let [width, height] = cfg.size.unwrap_or(grid.button_size);
            button_from_config(cfg, (x, y, width, height))
        })
        .collect()
}

fn button_from_config(cfg: &ButtonConfig, area: (i32, i32, i32, i32)) -> Result<ButtonArgs, ConfigError> {
    let mut button = ButtonArgs::new(area);

    if let Some(name) = &cfg.name {
        button = button.with_name(name);
    }
    if let Some(text) = &cfg.text {
        button = button.with_text(text);
    }
    if let Some([inactive, active]) = &cfg.images {
        button = button.with_images(ImageResource::new(inactive), ImageResource::new(active));
    }
    if let Some(color) = &cfg.inactive {
        button = button.with_inactive(color.to_spec()?);
    }
    if let Some(color) = &cfg.active {
        button = button.with_active(color.to_spec()?);
    }
    match &cfg.disabled {
        Some(DisabledConfig::Flag(flag)) => button = button.with_disabled(*flag),
        Some(DisabledConfig::Color(color)) => button = button.with_disabled(Disabled::Color(color.to_spec()?)),
        None => {}
    }
    if let Some(shadow) = cfg.shadow {
        button = button.with_shadow(shadow);
    }
    if let Some(color) = &cfg.shadow_color {
        button = button.with_shadow_color(color.to_spec()?);
    }
    if let Some([dx, dy]) = cfg.shadow_offset {
        button = button.with_shadow_offset(dx, dy);
    }
    button.style.rounding = cfg.rounding;

    Ok(button)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use sheen_ui::{Color, ColorSpec, Rect, ShapeKind, UNSET};

    #[test]
    fn test_buttons_fill_grid_in_order() {
        let config = Config::from_toml_str(
            r#"
            [[buttons]]
            name = "a"

            [[buttons]]
            name = "b"
            position = [300, 200]
            size = [60, 20]

            [[buttons]]
            name = "c"
            "#,
        )
        .unwrap();

        let buttons = create_buttons_from_config(&config.buttons, &config.grid, config.window.size).unwrap();
        assert_eq!(buttons[0].area, Rect::new(10, 10, 120, 30));
        assert_eq!(buttons[1].area, Rect::new(300, 200, 60, 20));
        assert_eq!(buttons[2].area, Rect::new(10, 50, 120, 30));
    }

    #[test]
    fn test_style_fields_carry_over() {
        let config = Config::from_toml_str(
            r#"
            [[buttons]]
            name = "save"
            text = "Save"
            inactive = "purple"
            disabled = [10, 20, 30]
            shadow = true
            shadow_offset = [4, 5]
            images = ["idle.png", "hot.png"]

            [buttons.rounding]
            bottom_left = 6
            "#,
        )
        .unwrap();

        let buttons = create_buttons_from_config(&config.buttons, &config.grid, config.window.size).unwrap();
        let save = &buttons[0];
        assert_eq!(save.name.as_deref(), Some("save"));
        assert_eq!(save.text.as_deref(), Some("Save"));
        assert_eq!(save.style.inactive, Some(ColorSpec::Literal(Color::PURPLE)));
        assert_eq!(
            save.style.disabled,
            Disabled::Color(ColorSpec::Literal(Color::rgb(10, 20, 30)))
        );
        assert_eq!(save.style.shadow, Some(true));
        assert_eq!(save.style.rounding.bottom_left, 6);
        assert_eq!(save.style.rounding.radius, UNSET);
        assert!(matches!(save.shape, ShapeKind::Image { .. }));
    }

    #[test]
    fn test_demo_buttons_build() {
        let config = Config::demo();
        let buttons = create_buttons_from_config(&config.buttons, &config.grid, config.window.size).unwrap();
        assert_eq!(buttons.len(), config.buttons.len());
        assert!(buttons.iter().all(|b| b.name.is_some()));
    }
}
