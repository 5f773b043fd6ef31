#![allow(dead_code)]

use mosdex_core::{InMemoryModel, ModelSpec};
use mosdex_format::{Document, WriterConfig, parse_document};
use serde_json::{Value, json};

pub fn document(value: Value) -> Document {
    parse_document(&value.to_string()).expect("valid document")
}

/// Run a model spec through the forward converter and read the result back.
pub fn forward(value: Value) -> Document {
    let spec: ModelSpec = serde_json::from_value(value).expect("valid model spec");
    let model = InMemoryModel::from_spec(spec).expect("valid model");
    let text = mosdex_format::convert(&model, &WriterConfig::new()).expect("convert");
    parse_document(&text).expect("written document parses")
}

/// `e(i).. x(i) =G= 1` over labels `a` and `b`, with one explicit lower bound.
pub fn diagonal() -> Value {
    json!({
        "PROBLEM": {"NAME": "diagonal"},
        "INPUT_DATA_MODEL": {
            "x": {"*i#x": "String", "lb": "Double", "ub": "Double"},
            "e": {"*i#e": "String", "rhs": "Double"},
            "coef_z_x": {"*i#x": "String", "val": "Double"},
            "coef_e_x": {"*i#e": "String", "val": "Double"}
        },
        "DATA": {
            "x": [
                {"i#x": "a", "lb": null, "ub": null},
                {"i#x": "b", "lb": 1.5, "ub": null}
            ],
            "e": [{"i#e": "a", "rhs": 1.0}, {"i#e": "b", "rhs": 1.0}],
            "coef_z_x": [{"i#x": "a", "val": 1.0}, {"i#x": "b", "val": 1.0}],
            "coef_e_x": [{"i#e": "a", "val": 2.0}, {"i#e": "b", "val": 3.0}]
        },
        "VARIABLES": [
            {"NAME": "x", "INDEX": "x", "TYPE": "Continuous",
             "BOUNDS": {"LOWER": "x.lb", "UPPER": "x.ub"}}
        ],
        "CONSTRAINTS": [
            {"NAME": "e", "INDEX": "e", "RHS": "e.rhs", "SENSE": ">=", "TYPE": "Linear"}
        ],
        "DECISION_EXPRESSIONS": [
            {"NAME": "z", "INDEX": "self", "SENSE": "minimize", "TYPE": "Linear"}
        ],
        "COEFFICIENTS": [
            {"CONSTRAINTS": "z", "VARIABLES": "x", "ENTRIES": "coef_z_x.val", "CONDITION": ""},
            {"CONSTRAINTS": "e", "VARIABLES": "x", "ENTRIES": "coef_e_x.val",
             "CONDITION": "x.i#x == e.i#e"}
        ]
    })
}

/// Plants ship to markets over `x(i,j)`.
pub fn transport() -> Value {
    let plants = ["seattle", "san-diego"];
    let markets = ["new-york", "chicago"];
    let mut shipments = Vec::new();
    let mut costs = Vec::new();
    let mut supply_coefs = Vec::new();
    let mut demand_coefs = Vec::new();
    for plant in plants {
        for market in markets {
            shipments.push(json!({"i#x": plant, "j#x": market}));
            costs.push(json!({"i#x": plant, "j#x": market, "val": 1.5}));
            supply_coefs.push(json!({"i#supply": plant, "j#x": market, "val": 1.0}));
            demand_coefs.push(json!({"j#demand": market, "i#x": plant, "val": 1.0}));
        }
    }
    shipments[0]["ub"] = json!(100.0);

    json!({
        "PROBLEM": {"NAME": "transport"},
        "INPUT_DATA_MODEL": {
            "x": {"*i#x": "String", "*j#x": "String", "lb": "Double", "ub": "Double"},
            "supply": {"*i#supply": "String", "rhs": "Double"},
            "demand": {"*j#demand": "String", "rhs": "Double"},
            "coef_z_x": {"*i#x": "String", "*j#x": "String", "val": "Double"},
            "coef_supply_x": {"*i#supply": "String", "*j#x": "String", "val": "Double"},
            "coef_demand_x": {"*j#demand": "String", "*i#x": "String", "val": "Double"}
        },
        "DATA": {
            "x": shipments,
            "supply": [{"i#supply": "seattle", "rhs": 350.0}, {"i#supply": "san-diego", "rhs": 600.0}],
            "demand": [{"j#demand": "new-york", "rhs": 325.0}, {"j#demand": "chicago", "rhs": 300.0}],
            "coef_z_x": costs,
            "coef_supply_x": supply_coefs,
            "coef_demand_x": demand_coefs
        },
        "VARIABLES": [
            {"NAME": "x", "INDEX": "x", "TYPE": "Continuous", "BOUNDS": {"UPPER": "x.ub"}}
        ],
        "CONSTRAINTS": [
            {"NAME": "supply", "INDEX": "supply", "RHS": "supply.rhs", "SENSE": "<=", "TYPE": "Linear"},
            {"NAME": "demand", "INDEX": "demand", "RHS": "demand.rhs", "SENSE": ">=", "TYPE": "Linear"}
        ],
        "DECISION_EXPRESSIONS": [
            {"NAME": "z", "INDEX": "self", "SENSE": "minimize", "TYPE": "Linear"}
        ],
        "COEFFICIENTS": [
            {"CONSTRAINTS": "z", "VARIABLES": "x", "ENTRIES": "coef_z_x.val", "CONDITION": ""},
            {"CONSTRAINTS": "supply", "VARIABLES": "x", "ENTRIES": "coef_supply_x.val",
             "CONDITION": "x.i#x == supply.i#supply"},
            {"CONSTRAINTS": "demand", "VARIABLES": "x", "ENTRIES": "coef_demand_x.val",
             "CONDITION": "x.j#x == demand.j#demand"}
        ]
    })
}

/// `link(k)` ties `w(i)` to a different domain with matching labels.
pub fn cross_domain() -> Value {
    json!({
        "PROBLEM": {"NAME": "cross"},
        "INPUT_DATA_MODEL": {
            "w": {"*i#w": "String", "lb": "Double", "ub": "Double"},
            "link": {"*k#link": "String", "rhs": "Double"},
            "coef_link_w": {"*k#link": "String", "val": "Double"}
        },
        "DATA": {
            "w": [{"i#w": "a"}, {"i#w": "b"}],
            "link": [{"k#link": "a", "rhs": 0.0}, {"k#link": "b", "rhs": 0.0}],
            "coef_link_w": [{"k#link": "a", "val": 1.0}, {"k#link": "b", "val": 1.0}]
        },
        "VARIABLES": [{"NAME": "w", "INDEX": "w", "TYPE": "Continuous"}],
        "CONSTRAINTS": [
            {"NAME": "link", "INDEX": "link", "RHS": "link.rhs", "SENSE": "==", "TYPE": "Linear"}
        ],
        "DECISION_EXPRESSIONS": [
            {"NAME": "z", "INDEX": "self", "SENSE": "maximize", "TYPE": "Linear"}
        ],
        "COEFFICIENTS": [
            {"CONSTRAINTS": "link", "VARIABLES": "w", "ENTRIES": "coef_link_w.val",
             "CONDITION": "w.i#w == link.k#link"}
        ]
    })
}

/// `e(i)` summing a variable that repeats its domain, `y(i,i)`.
pub fn repeated_domain() -> Value {
    json!({
        "PROBLEM": {"NAME": "square"},
        "INPUT_DATA_MODEL": {
            "y": {"*i#y": "String", "*i#y#2": "String", "lb": "Double", "ub": "Double"},
            "e": {"*i#e": "String", "rhs": "Double"},
            "coef_e_y": {"*i#e": "String", "*i#y#2": "String", "val": "Double"}
        },
        "DATA": {
            "y": [{"i#y": "a", "i#y#2": "b"}],
            "e": [{"i#e": "a", "rhs": 2.0}],
            "coef_e_y": [{"i#e": "a", "i#y#2": "b", "val": 1.0}]
        },
        "VARIABLES": [{"NAME": "y", "INDEX": "y", "TYPE": "Continuous"}],
        "CONSTRAINTS": [
            {"NAME": "e", "INDEX": "e", "RHS": "e.rhs", "SENSE": "<=", "TYPE": "Linear"}
        ],
        "DECISION_EXPRESSIONS": [
            {"NAME": "z", "INDEX": "self", "SENSE": "minimize", "TYPE": "Linear"}
        ],
        "COEFFICIENTS": [
            {"CONSTRAINTS": "e", "VARIABLES": "y", "ENTRIES": "coef_e_y.val",
             "CONDITION": "y.i#y == e.i#e"}
        ]
    })
}

/// A model spec with one binary and one integer column.
pub fn binaries_model() -> Value {
    json!({
        "name": "binaries",
        "class": "mip",
        "objective": {"name": "z", "nonzeros": [{"col": 0, "value": 1.0}, {"col": 2, "value": 1.0}]},
        "domains": ["i"],
        "symbols": [
            {"name": "y", "type": "variable", "domains": ["i"]},
            {"name": "n", "type": "variable"},
            {"name": "cover", "type": "equation"}
        ],
        "rows": [
            {"symbol": "cover", "sense": "G", "rhs": 1.0,
             "nonzeros": [{"col": 0, "value": 1.0}, {"col": 1, "value": 1.0}, {"col": 2, "value": -1.0}]}
        ],
        "cols": [
            {"symbol": "y", "labels": ["a"], "type": "B"},
            {"symbol": "y", "labels": ["b"], "type": "B", "lower": 0.3},
            {"symbol": "n", "type": "I", "upper": 10.0}
        ]
    })
}

/// `e(i).. sum(j, x(i,j)) =L= 4` as a model spec.
pub fn row_sum_model() -> Value {
    let mut cols = Vec::new();
    for i in ["a", "b"] {
        for j in ["p", "q"] {
            cols.push(json!({"symbol": "x", "labels": [i, j], "lower": 0.0}));
        }
    }
    json!({
        "name": "rowsum",
        "objective": {"name": "z", "sense": "maximize", "nonzeros": [{"col": 3, "value": 1.0}]},
        "domains": ["i", "j"],
        "symbols": [
            {"name": "x", "type": "variable", "domains": ["i", "j"]},
            {"name": "e", "type": "equation", "domains": ["i"]}
        ],
        "rows": [
            {"symbol": "e", "labels": ["a"], "sense": "L", "rhs": 4.0,
             "nonzeros": [{"col": 0, "value": 1.0}, {"col": 1, "value": 1.0}]},
            {"symbol": "e", "labels": ["b"], "sense": "L", "rhs": 4.0,
             "nonzeros": [{"col": 2, "value": 1.0}, {"col": 3, "value": 1.0}]}
        ],
        "cols": cols
    })
}
