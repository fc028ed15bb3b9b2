use shared::{Language, Tool};

/// Translate a key. Unknown keys come back as `"?"`.
pub fn t(lang: Language, key: &str) -> &'static str {
    let cn = lang == Language::Cn;
    match key {
        "title" => if cn { "体素磁带-88" } else { "VOX-CASSETTE-88" },

        // ── Tools ───────────────────────────────────────────
        "tools.pencil" => if cn { "绘制" } else { "DRAW" },
        "tools.eraser" => if cn { "擦除" } else { "ERASE" },
        "tools.paint" => if cn { "上色" } else { "PAINT" },
        "tools.picker" => if cn { "吸色" } else { "PICK" },
        "tools.duplicate" => if cn { "克隆" } else { "CLONE" },
        "tools.clear" => if cn { "清空" } else { "WIPE" },
        "tools.ai_assist" => if cn { "AI 辅助" } else { "AI ASSIST" },

        // ── UI ──────────────────────────────────────────────
        "ui.export" => if cn { "导出" } else { "EXPORT" },
        "ui.save" => if cn { "保存" } else { "STORE" },
        "ui.load" => if cn { "读取" } else { "RECALL" },
        "ui.undo" => if cn { "撤销" } else { "UNDO" },
        "ui.redo" => if cn { "重做" } else { "REDO" },
        "ui.colors" => if cn { "色谱" } else { "SPECTRUM" },
        "ui.grid_size" => if cn { "尺寸" } else { "DIMENSION" },
        "ui.language" => if cn { "语言" } else { "LANG" },
        "ui.ai_prompt_placeholder" => if cn { "描述一个场景..." } else { "Describe a scene..." },
        "ui.ai_button" => if cn { "处理" } else { "PROCESS" },
        "ui.ai_append" => if cn { "追加" } else { "APPEND" },
        "ui.ai_replace" => if cn { "替换" } else { "REWRITE" },
        "ui.ai_discard" => if cn { "丢弃" } else { "DISCARD" },
        "ui.ai_preview_title" => if cn { "预览就绪" } else { "PREVIEW READY" },
        "ui.ai_preview_color" => if cn { "覆写颜色" } else { "OVERRIDE COLOR" },
        "ui.outlines" => if cn { "轮廓" } else { "OUTLINES" },

        // ── Notifications ───────────────────────────────────
        "msg.saved" => if cn { "已存入磁带。" } else { "MEMORY STORED TO CASSETTE." },
        "msg.save_failed" => if cn { "保存失败。" } else { "STORE FAILED." },
        "msg.load_failed" => if cn { "读取失败。" } else { "RECALL FAILED." },
        "msg.ai_failed" => if cn { "AI 生成失败。" } else { "AI GENERATION FAILED." },

        _ => "?",
    }
}

/// Toolbar label for a tool
pub fn tool_label(lang: Language, tool: Tool) -> &'static str {
    match tool {
        Tool::Pencil => t(lang, "tools.pencil"),
        Tool::Eraser => t(lang, "tools.eraser"),
        Tool::Paint => t(lang, "tools.paint"),
        Tool::Picker => t(lang, "tools.picker"),
        Tool::Duplicate => t(lang, "tools.duplicate"),
    }
}
