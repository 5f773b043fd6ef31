#![allow(dead_code)]

use mosdex_core::{
    Bounds, DictSymbol, Dictionary, DomainId, IndexTuple, InMemoryModel, LabelId, ModelClass,
    ModelProvider, ModelSpec, NativeSymbolType, Nonzero, ObjectiveSense, SymbolId,
};
use serde_json::{Value, json};

pub fn model(value: Value) -> InMemoryModel {
    let spec: ModelSpec = serde_json::from_value(value).expect("valid model spec");
    InMemoryModel::from_spec(spec).expect("valid model")
}

/// Two plants, two markets.
///
/// `supply(i).. sum(j, x(i,j)) =L= a(i)` and
/// `demand(j).. sum(i, x(i,j)) =G= b(j)`, minimizing shipping cost.
pub fn transport() -> Value {
    let cost = [[2.5, 1.7], [1.8, 1.4]];
    let plants = ["seattle", "san-diego"];
    let markets = ["new-york", "chicago"];

    let mut cols = Vec::new();
    let mut objective = Vec::new();
    for (i, plant) in plants.iter().enumerate() {
        for (j, market) in markets.iter().enumerate() {
            cols.push(json!({"symbol": "x", "labels": [plant, market], "lower": 0.0}));
            objective.push(json!({"col": i * 2 + j, "value": cost[i][j]}));
        }
    }

    let mut rows = Vec::new();
    for (i, plant) in plants.iter().enumerate() {
        rows.push(json!({
            "symbol": "supply", "labels": [plant], "sense": "L", "rhs": 350.0 + 250.0 * i as f64,
            "nonzeros": [{"col": i * 2, "value": 1.0}, {"col": i * 2 + 1, "value": 1.0}]
        }));
    }
    for (j, market) in markets.iter().enumerate() {
        rows.push(json!({
            "symbol": "demand", "labels": [market], "sense": "G", "rhs": 325.0 - 25.0 * j as f64,
            "nonzeros": [{"col": j, "value": 1.0}, {"col": 2 + j, "value": 1.0}]
        }));
    }

    json!({
        "name": "transport",
        "class": "lp",
        "objective": {"name": "z", "sense": "minimize", "nonzeros": objective},
        "domains": ["i", "j"],
        "symbols": [
            {"name": "x", "type": "variable", "domains": ["i", "j"], "text": "shipment quantities"},
            {"name": "supply", "type": "equation", "domains": ["i"]},
            {"name": "demand", "type": "equation", "domains": ["j"]}
        ],
        "rows": rows,
        "cols": cols
    })
}

/// `link(i,k)` over the same domain twice, coupled with `y(i)` on the diagonal.
pub fn repeated_domain() -> Value {
    json!({
        "name": "repeated",
        "objective": {"name": "z"},
        "domains": ["i"],
        "symbols": [
            {"name": "y", "type": "variable", "domains": ["i"]},
            {"name": "w", "type": "variable", "domains": ["i"]},
            {"name": "link", "type": "equation", "domains": ["i", "i"]}
        ],
        "rows": [
            {"symbol": "link", "labels": ["a", "a"], "sense": "L",
             "nonzeros": [{"col": 0, "value": 1.0}, {"col": 2, "value": 1.0}]},
            {"symbol": "link", "labels": ["a", "b"], "sense": "L",
             "nonzeros": [{"col": 3, "value": -1.0}]},
            {"symbol": "link", "labels": ["b", "b"], "sense": "L",
             "nonzeros": [{"col": 1, "value": 1.0}, {"col": 3, "value": 1.0}]}
        ],
        "cols": [
            {"symbol": "y", "labels": ["a"]},
            {"symbol": "y", "labels": ["b"]},
            {"symbol": "w", "labels": ["a"]},
            {"symbol": "w", "labels": ["b"]}
        ]
    })
}

/// Same label text in two different domains.
pub fn cross_domain() -> Value {
    json!({
        "name": "cross",
        "objective": {"name": "z"},
        "domains": ["i", "j"],
        "symbols": [
            {"name": "u", "type": "variable", "domains": ["j"]},
            {"name": "h", "type": "equation", "domains": ["i"]}
        ],
        "rows": [
            {"symbol": "h", "labels": ["a"], "sense": "E", "nonzeros": [{"col": 0, "value": 1.0}]},
            {"symbol": "h", "labels": ["b"], "sense": "E", "nonzeros": [{"col": 1, "value": 1.0}]}
        ],
        "cols": [
            {"symbol": "u", "labels": ["a"]},
            {"symbol": "u", "labels": ["b"]}
        ]
    })
}

/// `g(i).. sum(k, v(k))` observed on a single instance only.
pub fn single_entry() -> Value {
    json!({
        "name": "single",
        "objective": {"name": "z"},
        "domains": ["i"],
        "symbols": [
            {"name": "v", "type": "variable", "domains": ["i"]},
            {"name": "g", "type": "equation", "domains": ["i"]}
        ],
        "rows": [
            {"symbol": "g", "labels": ["a"], "sense": "G", "rhs": 1.0,
             "nonzeros": [{"col": 0, "value": 1.0}]}
        ],
        "cols": [
            {"symbol": "v", "labels": ["a"]},
            {"symbol": "v", "labels": ["b"]}
        ]
    })
}

/// One scalar row `e` with one nonzero on one scalar column.
///
/// The dictionary reports `col_owner` as the column's symbol, which lets a
/// test point it past the declared symbols. Symbol 1 is the variable `x`,
/// symbol 2 the equation `e`.
pub struct SingleNonzero {
    pub col_owner: SymbolId,
}

impl Dictionary for SingleNonzero {
    fn domain_count(&self) -> usize {
        0
    }

    fn domain_name(&self, _id: DomainId) -> Option<String> {
        None
    }

    fn symbol_count(&self) -> usize {
        2
    }

    fn symbol(&self, id: SymbolId) -> Option<DictSymbol> {
        let (name, kind) = match id.inner() {
            1 => ("x", NativeSymbolType::Variable),
            2 => ("e", NativeSymbolType::Equation),
            _ => return None,
        };
        Some(DictSymbol {
            name: name.to_string(),
            text: String::new(),
            kind,
            domains: Vec::new(),
        })
    }

    fn symbol_offset(&self, id: SymbolId) -> Option<usize> {
        matches!(id.inner(), 1 | 2).then_some(0)
    }

    fn row_count(&self) -> usize {
        1
    }

    fn col_count(&self) -> usize {
        1
    }

    fn row_entry(&self, row: usize) -> Option<IndexTuple> {
        (row == 0).then(|| IndexTuple {
            symbol: SymbolId::new(2),
            labels: Vec::new(),
        })
    }

    fn col_entry(&self, col: usize) -> Option<IndexTuple> {
        (col == 0).then(|| IndexTuple {
            symbol: self.col_owner,
            labels: Vec::new(),
        })
    }

    fn label_text(&self, _label: LabelId) -> Option<String> {
        None
    }
}

impl ModelProvider for SingleNonzero {
    fn name(&self) -> String {
        "single".to_string()
    }

    fn class(&self) -> ModelClass {
        ModelClass::Lp
    }

    fn objective_name(&self) -> String {
        "z".to_string()
    }

    fn objective_sense(&self) -> ObjectiveSense {
        ObjectiveSense::Minimize
    }

    fn row_count(&self) -> usize {
        1
    }

    fn col_count(&self) -> usize {
        1
    }

    fn row_nonzeros(&self, row: usize) -> Vec<Nonzero> {
        if row == 0 {
            vec![Nonzero {
                col: 0,
                value: 1.0,
                nonlinear: false,
            }]
        } else {
            Vec::new()
        }
    }

    fn objective_nonzeros(&self) -> Vec<Nonzero> {
        Vec::new()
    }

    fn col_bounds(&self, _col: usize) -> Bounds {
        Bounds::new(0.0, f64::INFINITY)
    }

    fn col_type(&self, _col: usize) -> char {
        'X'
    }

    fn row_rhs(&self, _row: usize) -> f64 {
        0.0
    }

    fn row_sense(&self, _row: usize) -> char {
        'E'
    }

    fn solver_row(&self, model_row: usize) -> Option<usize> {
        (model_row == 0).then_some(0)
    }

    fn solver_col(&self, model_col: usize) -> Option<usize> {
        (model_col == 0).then_some(0)
    }

    fn model_row(&self, solver_row: usize) -> usize {
        solver_row
    }

    fn model_col(&self, solver_col: usize) -> usize {
        solver_col
    }

    fn dictionary(&self) -> Option<&dyn Dictionary> {
        Some(self)
    }
}
