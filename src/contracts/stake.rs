use super::{nonpayable, payable, view, Abi};

pub static STAKE_ABI: Abi = Abi {
    name: "MetaNodeStake",
    functions: &[
        view("pool"),
        view("user"),
        view("withdrawAmount"),
        view("pendingMetaNode"),
        view("stakingBalance"),
        view("claimPaused"),
        view("withdrawPaused"),
        view("poolLength"),
        payable("depositETH"),
        nonpayable("unstake"),
        nonpayable("withdraw"),
        nonpayable("claim"),
        // admin
        nonpayable("addPool"),
        nonpayable("pauseClaim"),
        nonpayable("unpauseClaim"),
        nonpayable("pauseWithdraw"),
        nonpayable("unpauseWithdraw"),
    ],
};
