//! Property-based checks over the inside/prefix chart engines and the
//! left-corner closure, run against a handful of fixed CNF grammars rather
//! than fully randomly-generated ones (a random weight assignment has no
//! guarantee of converging, which would make most of these properties
//! vacuous or force every test to filter on `plc().is_ok()`).

use approx::assert_abs_diff_eq;
use proptest::prelude::*;

use lripar::{BodyElem, CFG, NT, Parser, Sym};

fn nt(name: &str) -> NT {
    NT::new(name)
}

fn term(name: &str) -> BodyElem {
    BodyElem::Terminal(Sym::new(name))
}

fn rule(name: &str) -> BodyElem {
    BodyElem::Nonterminal(NT::new(name))
}

/// S -> Y Z (1); Y -> Z Y (0.5); Y -> a (0.5); Z -> a (1). A proper PCFG
/// (every head's outgoing weights sum to 1) whose left-corner matrix is
/// nilpotent, so it both converges and stays a valid probability measure.
fn grammar_a() -> CFG {
    let mut cfg = CFG::with_start(nt("S"));
    cfg.add(1.0, nt("S"), vec![rule("Y"), rule("Z")]).unwrap();
    cfg.add(0.5, nt("Y"), vec![rule("Z"), rule("Y")]).unwrap();
    cfg.add(0.5, nt("Y"), vec![term("a")]).unwrap();
    cfg.add(1.0, nt("Z"), vec![term("a")]).unwrap();
    cfg
}

/// A denser, still-convergent grammar (several competing binary
/// productions per head) for exercising `cky`/`cky_fast` and
/// `lri`/`lri_fast` agreement over longer inputs.
fn grammar_dense() -> CFG {
    let mut cfg = CFG::with_start(nt("S"));
    cfg.add(0.4, nt("S"), vec![rule("A"), rule("B")]).unwrap();
    cfg.add(0.3, nt("S"), vec![rule("B"), rule("A")]).unwrap();
    cfg.add(0.3, nt("S"), vec![term("a")]).unwrap();
    cfg.add(0.5, nt("A"), vec![rule("A"), rule("B")]).unwrap();
    cfg.add(0.25, nt("A"), vec![term("a")]).unwrap();
    cfg.add(0.25, nt("A"), vec![term("b")]).unwrap();
    cfg.add(0.6, nt("B"), vec![term("b")]).unwrap();
    cfg.add(0.4, nt("B"), vec![term("a")]).unwrap();
    cfg
}

#[test]
fn p1_in_cnf_accepts_and_rejects() {
    let good = grammar_a();
    assert!(good.in_cnf());

    // S -> S A violates the "B, C != S" CNF restriction on binary bodies.
    let mut bad_self_recursive = CFG::with_start(nt("S"));
    bad_self_recursive
        .add(1.0, nt("S"), vec![rule("S"), rule("A")])
        .unwrap();
    bad_self_recursive.add(1.0, nt("A"), vec![term("a")]).unwrap();
    assert!(!bad_self_recursive.in_cnf());

    // S -> A B C is neither binary nor a single terminal/epsilon.
    let mut bad_ternary = CFG::with_start(nt("S"));
    bad_ternary
        .add(1.0, nt("S"), vec![rule("A"), rule("B"), rule("C")])
        .unwrap();
    assert!(!bad_ternary.in_cnf());
}

#[test]
fn p2_additive_insertion_accumulates() {
    let mut cfg = CFG::with_start(nt("S"));
    for _ in 0..5 {
        cfg.add(0.1, nt("S"), vec![term("a")]).unwrap();
    }
    let prod = cfg.terminal_productions().next().unwrap().0.clone();
    assert_abs_diff_eq!(cfg.weight(&prod), 0.5, epsilon = 1e-12);
}

fn token_strategy() -> impl Strategy<Value = Vec<Sym>> {
    prop::collection::vec(prop_oneof![Just("a"), Just("b")], 0..6)
        .prop_map(|v| v.into_iter().map(Sym::new).collect())
}

proptest! {
    #[test]
    fn p3_cky_fast_matches_cky(tokens in token_strategy()) {
        let cfg = grammar_dense();
        let parser = Parser::new(&cfg);
        let slow = parser.cky(tokens.clone(), true).unwrap().into_chart();
        let fast = parser.cky_fast(tokens, true).unwrap().into_chart();
        for (i, x, k, w) in slow.iter() {
            prop_assert!((w - fast.get(i, x, k)).abs() <= 1e-12 * w.abs().max(1.0));
        }
        for (i, x, k, w) in fast.iter() {
            prop_assert!((w - slow.get(i, x, k)).abs() <= 1e-12 * w.abs().max(1.0));
        }
    }

    #[test]
    fn p4_lri_fast_matches_lri(tokens in token_strategy()) {
        let cfg = grammar_dense();
        let parser = Parser::new(&cfg);
        let slow = parser.lri(tokens.clone(), true).unwrap().into_chart();
        let fast = parser.lri_fast(tokens, true).unwrap().into_chart();
        for (i, x, k, w) in slow.iter() {
            prop_assert!((w - fast.get(i, x, k)).abs() <= 1e-12 * w.abs().max(1.0));
        }
        for (i, x, k, w) in fast.iter() {
            prop_assert!((w - slow.get(i, x, k)).abs() <= 1e-12 * w.abs().max(1.0));
        }
    }

    #[test]
    fn p5_prefix_dominates_inside(tokens in token_strategy()) {
        let cfg = grammar_dense();
        let parser = Parser::new(&cfg);
        let beta = parser.cky(tokens.clone(), true).unwrap().into_chart();
        let ppre = parser.lri(tokens, true).unwrap().into_chart();
        for (i, x, k, b) in beta.iter() {
            prop_assert!(ppre.get(i, x, k) + 1e-9 >= b);
        }
    }

    #[test]
    fn p6_empty_prefix_identity(tokens in token_strategy()) {
        let cfg = grammar_dense();
        let parser = Parser::new(&cfg);
        let n = tokens.len();
        let ppre = parser.lri(tokens, true).unwrap().into_chart();
        let vidx = ppre.vindex();
        for x in vidx.iter() {
            for k in 0..=n {
                prop_assert!((ppre.get(k, x, k) - 1.0).abs() <= 1e-12);
            }
        }
    }
}

#[test]
fn p7_proper_pcfg_prefix_probability_is_bounded() {
    let cfg = grammar_a();
    let parser = Parser::new(&cfg);
    for len in 0..5 {
        let tokens: Vec<Sym> = std::iter::repeat_with(|| Sym::new("a")).take(len).collect();
        let p = parser.lri(tokens, false).unwrap().scalar();
        assert!((0.0..=1.0 + 1e-9).contains(&p), "ppre = {p} out of [0, 1] at length {len}");
    }
}

#[test]
fn p8_closure_inverts_one_minus_p() {
    let cfg = grammar_a();
    let parser = Parser::new(&cfg);
    let e = parser.plc().unwrap();

    // P[X, Y] = sum_Z w(X -> Y Z), built the same way `closure::Closure`
    // does, to check E against it independently of that module's own tests.
    use ndarray::Array2;
    let vidx_order = ["S", "Y", "Z"];
    let idx = |name: &str| vidx_order.iter().position(|&n| n == name).unwrap();
    let mut p = Array2::<f64>::zeros((3, 3));
    for (prod, w) in cfg.binary_productions() {
        if let [BodyElem::Nonterminal(y), BodyElem::Nonterminal(_z)] = prod.body() {
            p[[idx(prod.head().name()), idx(y.name())]] += w;
        }
    }
    let id = Array2::<f64>::eye(3);
    let product = e.dot(&(&id - &p));
    for i in 0..3 {
        for j in 0..3 {
            let expect = if i == j { 1.0 } else { 0.0 };
            assert_abs_diff_eq!(product[[i, j]], expect, epsilon = 1e-9);
        }
    }
}
