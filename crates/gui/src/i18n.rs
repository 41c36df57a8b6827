use std::sync::atomic::{AtomicU8, Ordering};

use crate::state::Language;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    En,
    Ru,
}

impl From<Language> for Lang {
    fn from(l: Language) -> Self {
        match l {
            Language::En => Lang::En,
            Language::Ru => Lang::Ru,
        }
    }
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=En (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::Ru,
        _ => Lang::En,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::En => 0,
            Lang::Ru => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let ru = lang() == Lang::Ru;
    match key {
        // ── Main menus ──────────────────────────────────────
        "menu.file" => if ru { "Файл" } else { "File" },
        "menu.open" => if ru { "Открыть слои..." } else { "Open Layers..." },
        "menu.open_title" => if ru { "Открыть JSON слоёв" } else { "Open Layers JSON" },
        "menu.save" => if ru { "Сохранить слои..." } else { "Save Layers..." },
        "menu.save_title" => if ru { "Сохранить JSON слоёв" } else { "Save Layers JSON" },
        "menu.clear" => if ru { "Очистить все слои" } else { "Clear all layers" },
        "menu.quit" => if ru { "Выход" } else { "Quit" },

        "menu.edit" => if ru { "Правка" } else { "Edit" },
        "menu.delete" => if ru { "Удалить выделенное  Del" } else { "Delete selection  Del" },
        "menu.delete_last" => if ru { "Удалить последний треугольник" } else { "Delete last triangle" },
        "menu.deselect_all" => if ru { "Снять выделение  Esc" } else { "Deselect all  Esc" },

        "menu.view" => if ru { "Вид" } else { "View" },
        "menu.layer_panel" => if ru { "Панель слоёв" } else { "Layer panel" },
        "menu.preview" => if ru { "Предпросмотр" } else { "Preview" },
        "menu.grid" => if ru { "Сетка" } else { "Grid" },
        "menu.reset_view" => if ru { "Сбросить вид  Home" } else { "Reset view  Home" },
        "menu.language" => if ru { "Язык" } else { "Language" },

        "menu.settings" => if ru { "Настройки" } else { "Settings" },
        "menu.preferences" => if ru { "Параметры..." } else { "Preferences..." },

        // ── Toolbar ─────────────────────────────────────────
        "tb.layer" => if ru { "Слой:" } else { "Layer:" },
        "tb.add_vertex" => if ru { "➕ Вершина" } else { "➕ Vertex" },
        "tb.triangle" => if ru { "△ Треугольник" } else { "△ Triangle" },
        "tb.delete_last" => if ru { "↶ Последний" } else { "↶ Last" },
        "tb.delete_sel" => if ru { "🗑 Удалить" } else { "🗑 Delete" },
        "tb.reset_view" => if ru { "⟲ Вид" } else { "⟲ View" },
        "tip.add_vertex" => if ru { "Клик добавляет вершину в активный слой (V)" } else { "Click places a vertex on the active layer (V)" },
        "tip.triangle" => if ru { "Выберите три вершины, чтобы создать треугольник (T)" } else { "Pick three vertices to create a triangle (T)" },
        "tip.delete_last" => if ru { "Удалить последний треугольник активного слоя" } else { "Remove the last triangle of the active layer" },
        "tip.delete_sel" => if ru { "Удалить выделенные вершины и треугольники" } else { "Delete selected vertices and triangles" },
        "tip.reset_view" => if ru { "Показать исходную область" } else { "Show the initial world rectangle" },

        // ── Layer panel ─────────────────────────────────────
        "layers.title" => if ru { "Слои" } else { "Layers" },
        "layers.vertices" => if ru { "верш." } else { "vert." },
        "layers.triangles" => if ru { "треуг." } else { "tri." },
        "layers.empty" => if ru { "пусто" } else { "empty" },

        // ── Status bar ──────────────────────────────────────
        "status.layer" => if ru { "Слой" } else { "Layer" },
        "status.vertices" => if ru { "Вершины" } else { "Vertices" },
        "status.triangles" => if ru { "Треугольники" } else { "Triangles" },
        "status.selected" => if ru { "Выделено" } else { "Selected" },
        "status.ready" => if ru { "Готово" } else { "Ready" },
        "hint.add_vertex" => if ru { "Клик: новая вершина" } else { "Click: place vertex" },
        "hint.pick" => if ru { "Выберите вершины треугольника" } else { "Pick triangle vertices" },
        "hint.esc" => if ru { "Esc: отмена" } else { "Esc: cancel" },
        "hint.nav" => if ru { "Колесо: масштаб · Средняя/правая кнопка: панорама" } else { "Wheel: zoom · Middle/right drag: pan" },

        // ── Preview ─────────────────────────────────────────
        "preview.title" => if ru { "Предпросмотр" } else { "Preview" },

        // ── Settings window ─────────────────────────────────
        "settings.title" => if ru { "Настройки" } else { "Settings" },
        "settings.grid" => if ru { "Сетка" } else { "Grid" },
        "settings.grid_visible" => if ru { "Показывать сетку" } else { "Show grid" },
        "settings.grid_step" => if ru { "Шаг линий" } else { "Line step" },
        "settings.snap_enabled" => if ru { "Привязка к сетке" } else { "Snap to grid" },
        "settings.snap_cell" => if ru { "Шаг привязки" } else { "Snap cell" },

        "settings.camera" => if ru { "Камера" } else { "Camera" },
        "settings.zoom_step" => if ru { "Шаг масштаба" } else { "Zoom step" },
        "settings.preview_margin" => if ru { "Отступ предпросмотра" } else { "Preview margin" },

        "settings.ui" => if ru { "Интерфейс" } else { "Interface" },
        "settings.font_size" => if ru { "Размер шрифта" } else { "Font size" },
        "settings.inactive_opacity" => if ru { "Прозрачность неактивных слоёв" } else { "Inactive layer opacity" },
        "settings.vertex_radius" => if ru { "Радиус вершины" } else { "Vertex radius" },

        "settings.apply" => if ru { "Применить" } else { "Apply" },
        "settings.reset" => if ru { "Сбросить" } else { "Reset" },
        "settings.close" => if ru { "Закрыть" } else { "Close" },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}
