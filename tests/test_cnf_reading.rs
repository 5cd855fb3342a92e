use rand::{rngs::StdRng, SeedableRng};
use std::io::Write;
use tempfile::NamedTempFile;
use wcnf_rs::{CnfReader, Literal, VarOrderingHeuristic, WeightFormat};

fn create_tempfile(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_read_unweighted_file() {
    let file = create_tempfile("p cnf 3 2\n1 -2 0\n2 3 0\n");
    let cnf = CnfReader::new(WeightFormat::Unweighted)
        .read_path(file.path().as_os_str().to_str().unwrap())
        .unwrap();
    assert_eq!(3, cnf.declared_var_count());
    assert_eq!(2, cnf.clauses().len());
    assert_eq!(vec![0, 1, 2], cnf.apparent_vars().to_vec());
    assert_eq!(1., cnf.literal_weights()[&Literal::from(-3)]);
    std::mem::drop(file);
}

#[test]
fn test_read_wpcnf_file_and_order_additive_vars() {
    let file = create_tempfile(
        "p wpcnf 3 3\nvp 1 3 0\nw 2 0.5 0\nw -2 0.5 0\n1 2 0\n2 3 0\n-1 -3 0\n",
    );
    let cnf = CnfReader::new(WeightFormat::Wpcnf)
        .read_path(file.path().as_os_str().to_str().unwrap())
        .unwrap();
    assert_eq!(
        vec![1],
        cnf.disjunctive_vars().iter_vars().collect::<Vec<_>>()
    );
    let mut rng = StdRng::seed_from_u64(0);
    let ordering = VarOrderingHeuristic::Minfill.restricted_var_ordering(
        &cnf,
        false,
        &mut rng,
        cnf.additive_vars(),
    );
    assert_eq!(2, ordering.len());
    assert!(!ordering.contains(&1));
    std::mem::drop(file);
}

#[test]
fn test_read_missing_file() {
    let result = CnfReader::new(WeightFormat::Unweighted).read_path("/does/not/exist.cnf");
    assert!(result.is_err());
}
