/// Test initialization that sets the transaction policy to rollback on success.
///
/// Runs once per integration test binary that includes this file, so every
/// `with_txn` body in that binary leaves storage untouched. Binaries that
/// omit it commit on success, as production does.
#[ctor::ctor]
fn init_test_txn_policy() {
    sim_backend::db::txn_policy::set_txn_policy(
        sim_backend::db::txn_policy::TxnPolicy::RollbackOnOk,
    );
}
