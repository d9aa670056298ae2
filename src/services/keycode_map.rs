use std::collections::HashMap;
use once_cell::sync::Lazy;

use crate::events::KeyCode;

/// Маппинг между именами клавиш и виртуальными кодами macOS (kVK_*)
pub struct KeycodeMap;

// Статическая карта клавиш ANSI-раскладки
static KEY_NAME_TO_CODE: Lazy<HashMap<&'static str, u16>> = Lazy::new(|| {
    let mut map = HashMap::new();

    // Буквенные клавиши
    map.insert("a", 0x00);  // kVK_ANSI_A
    map.insert("s", 0x01);  // kVK_ANSI_S
    map.insert("d", 0x02);  // kVK_ANSI_D
    map.insert("f", 0x03);  // kVK_ANSI_F
    map.insert("h", 0x04);  // kVK_ANSI_H
    map.insert("g", 0x05);  // kVK_ANSI_G
    map.insert("z", 0x06);  // kVK_ANSI_Z
    map.insert("x", 0x07);  // kVK_ANSI_X
    map.insert("c", 0x08);  // kVK_ANSI_C
    map.insert("v", 0x09);  // kVK_ANSI_V
    map.insert("b", 0x0B);  // kVK_ANSI_B
    map.insert("q", 0x0C);  // kVK_ANSI_Q
    map.insert("w", 0x0D);  // kVK_ANSI_W
    map.insert("e", 0x0E);  // kVK_ANSI_E
    map.insert("r", 0x0F);  // kVK_ANSI_R
    map.insert("y", 0x10);  // kVK_ANSI_Y
    map.insert("t", 0x11);  // kVK_ANSI_T
    map.insert("o", 0x1F);  // kVK_ANSI_O
    map.insert("u", 0x20);  // kVK_ANSI_U
    map.insert("i", 0x22);  // kVK_ANSI_I
    map.insert("p", 0x23);  // kVK_ANSI_P
    map.insert("l", 0x25);  // kVK_ANSI_L
    map.insert("j", 0x26);  // kVK_ANSI_J
    map.insert("k", 0x28);  // kVK_ANSI_K
    map.insert("n", 0x2D);  // kVK_ANSI_N
    map.insert("m", 0x2E);  // kVK_ANSI_M

    // Цифровые клавиши (верхний ряд)
    map.insert("1", 0x12);  // kVK_ANSI_1
    map.insert("2", 0x13);  // kVK_ANSI_2
    map.insert("3", 0x14);  // kVK_ANSI_3
    map.insert("4", 0x15);  // kVK_ANSI_4
    map.insert("6", 0x16);  // kVK_ANSI_6
    map.insert("5", 0x17);  // kVK_ANSI_5
    map.insert("9", 0x19);  // kVK_ANSI_9
    map.insert("7", 0x1A);  // kVK_ANSI_7
    map.insert("8", 0x1C);  // kVK_ANSI_8
    map.insert("0", 0x1D);  // kVK_ANSI_0

    // Специальные клавиши
    map.insert("grave", 0x32);      // kVK_ANSI_Grave
    map.insert("return", 0x24);     // kVK_Return
    map.insert("tab", 0x30);        // kVK_Tab
    map.insert("space", 0x31);      // kVK_Space
    map.insert("delete", 0x33);     // kVK_Delete
    map.insert("escape", 0x35);     // kVK_Escape

    // Стрелки
    map.insert("left", 0x7B);       // kVK_LeftArrow
    map.insert("right", 0x7C);      // kVK_RightArrow
    map.insert("down", 0x7D);       // kVK_DownArrow
    map.insert("up", 0x7E);         // kVK_UpArrow

    // Функциональные клавиши
    map.insert("f1", 0x7A);
    map.insert("f2", 0x78);
    map.insert("f3", 0x63);         // Mission Control на большинстве клавиатур
    map.insert("f4", 0x76);
    map.insert("f5", 0x60);
    map.insert("f6", 0x61);
    map.insert("f7", 0x62);
    map.insert("f8", 0x64);
    map.insert("f9", 0x65);
    map.insert("f10", 0x6D);
    map.insert("f11", 0x67);
    map.insert("f12", 0x6F);

    map
});

static CODE_TO_KEY_NAME: Lazy<HashMap<u16, &'static str>> = Lazy::new(|| {
    KEY_NAME_TO_CODE.iter().map(|(&name, &code)| (code, name)).collect()
});

// Синонимы, которые удобно писать в переменных окружения
fn canonical_name(key_name: &str) -> String {
    let normalized = key_name.trim().to_lowercase();
    match normalized.as_str() {
        "`" | "backtick" | "backquote" => "grave".to_string(),
        "esc" => "escape".to_string(),
        "enter" => "return".to_string(),
        "backspace" => "delete".to_string(),
        _ => normalized,
    }
}

impl KeycodeMap {
    /// Получить код клавиши по её имени
    pub fn get_keycode(key_name: &str) -> Result<KeyCode, String> {
        let normalized = canonical_name(key_name);
        KEY_NAME_TO_CODE.get(normalized.as_str())
            .map(|&code| KeyCode::new(code))
            .ok_or_else(|| format!("Unknown key: {}", key_name))
    }

    /// Получить имя клавиши по её коду
    pub fn get_key_name(keycode: KeyCode) -> Option<&'static str> {
        CODE_TO_KEY_NAME.get(&keycode.value()).copied()
    }
}
