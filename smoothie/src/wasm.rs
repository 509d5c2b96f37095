use crate::{Engine, EngineConfig, RuleRegistry, SmoothieError};
use serde_json::json;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmEngine {
    engine: Engine,
}

#[wasm_bindgen]
impl WasmEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();

        WasmEngine {
            engine: Engine::new(),
        }
    }

    /// Build an engine from a configuration JSON and an optional rule table JSON
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config_json: &str, rules_json: &str) -> Result<WasmEngine, JsValue> {
        console_error_panic_hook::set_once();

        let build = || -> Result<Engine, SmoothieError> {
            let config = if config_json.trim().is_empty() {
                EngineConfig::default()
            } else {
                EngineConfig::from_json(config_json)?
            };
            let registry = if rules_json.trim().is_empty() {
                RuleRegistry::default()
            } else {
                RuleRegistry::from_json(rules_json)?
            };
            Engine::with_registry(config, registry)
        };

        build()
            .map(|engine| WasmEngine { engine })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = parseFormula)]
    pub fn parse_formula(&self, text: &str) -> String {
        match self.engine.parse_formula(text) {
            Ok(formula) => json!({
                "success": true,
                "formula": formula.normalized,
                "tokens": formula.tokens,
                "error": null
            })
            .to_string(),
            Err(e) => failure(&["formula", "tokens"], &e.to_string()),
        }
    }

    /// `premises_json` is a JSON array of formula strings
    #[wasm_bindgen(js_name = validateInference)]
    pub fn validate_inference(&self, premises_json: &str, conclusion: &str, rule_id: &str) -> String {
        let premises: Vec<String> = match serde_json::from_str(premises_json) {
            Ok(p) => p,
            Err(e) => return failure(&["verdict"], &format!("Invalid premises JSON: {}", e)),
        };
        let refs: Vec<&str> = premises.iter().map(String::as_str).collect();
        let verdict = self.engine.validate_inference(&refs, conclusion, rule_id);
        json!({ "success": true, "verdict": verdict, "error": null }).to_string()
    }

    #[wasm_bindgen(js_name = applyRule)]
    pub fn apply_rule(&self, rule_id: &str, selected_json: &str) -> String {
        let selected: Vec<String> = match serde_json::from_str(selected_json) {
            Ok(s) => s,
            Err(e) => return failure(&["formula"], &format!("Invalid selection JSON: {}", e)),
        };
        let refs: Vec<&str> = selected.iter().map(String::as_str).collect();
        let derived = self.engine.apply_rule(rule_id, &refs);
        json!({ "success": true, "formula": derived, "error": null }).to_string()
    }

    #[wasm_bindgen(js_name = identifyRule)]
    pub fn identify_rule(&self, premises_json: &str, conclusion: &str) -> String {
        let premises: Vec<String> = match serde_json::from_str(premises_json) {
            Ok(p) => p,
            Err(e) => return failure(&["rule"], &format!("Invalid premises JSON: {}", e)),
        };
        let refs: Vec<&str> = premises.iter().map(String::as_str).collect();
        let rule = self.engine.identify_rule(&refs, conclusion);
        json!({ "success": true, "rule": rule, "error": null }).to_string()
    }

    /// `expected` may be empty when the player has no target in mind
    #[wasm_bindgen(js_name = generateHint)]
    pub fn generate_hint(&self, rule_id: &str, premises_json: &str, expected: &str) -> String {
        let premises: Vec<String> = match serde_json::from_str(premises_json) {
            Ok(p) => p,
            Err(e) => return failure(&["hint"], &format!("Invalid premises JSON: {}", e)),
        };
        let refs: Vec<&str> = premises.iter().map(String::as_str).collect();
        let expected = (!expected.trim().is_empty()).then_some(expected);
        let hint = self.engine.generate_hint(rule_id, &refs, expected);
        json!({ "success": true, "hint": hint, "error": null }).to_string()
    }

    #[wasm_bindgen(js_name = listRules)]
    pub fn list_rules(&self) -> String {
        let rules: Vec<_> = self.engine.registry().iter().collect();
        json!({ "success": true, "rules": rules, "error": null }).to_string()
    }
}

impl Default for WasmEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn failure(fields: &[&str], message: &str) -> String {
    let mut body = serde_json::Map::new();
    body.insert("success".to_string(), json!(false));
    for field in fields {
        body.insert(field.to_string(), serde_json::Value::Null);
    }
    body.insert("error".to_string(), json!(message));
    serde_json::Value::Object(body).to_string()
}
