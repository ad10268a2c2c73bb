//! In-process runtime that drives the program through its entrypoint.
//!
//! Accounts are serialized into the loader's input layout, handed to
//! `depoll::entry`, and written back only when the instruction succeeds.
//! System Program calls and the Clock and Rent sysvars are served by syscall
//! stubs.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Once;

use anchor_lang::prelude::{Clock, Pubkey, Rent};
use anchor_lang::solana_program::{
    account_info::AccountInfo,
    entrypoint::{
        deserialize, ProgramResult, MAX_PERMITTED_DATA_INCREASE, NON_DUP_MARKER, SUCCESS,
    },
    instruction::Instruction,
    program_error::ProgramError,
    system_instruction::SystemInstruction,
    system_program,
};
use anchor_lang::{AccountDeserialize, AccountSerialize, InstructionData, ToAccountMetas};
use depoll::{constants::*, state::*};
use solana_sysvar::program_stubs::{set_syscall_stubs, SyscallStubs};

pub const NOW: i64 = 1_700_000_000;
pub const STARTING_BALANCE: u64 = 10_000_000_000;

pub const AVATAR: &str = "https://cdn.example/avatar.jpeg";
pub const TITLE: &str = "👋 Hey, this is the poll owner";
pub const ABOUT: &str = "Let me know what concept you would like me to explain!";

pub fn identity(n: u8) -> Pubkey {
    Pubkey::new_from_array([n; 32])
}

pub fn custom(code: impl Into<u32>) -> ProgramError {
    ProgramError::Custom(code.into())
}

pub fn registry_address() -> Pubkey {
    Pubkey::find_program_address(&[REGISTRY_SEED], &depoll::ID).0
}

pub fn poll_address(owner: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[POLL_SEED, owner.as_ref()], &depoll::ID).0
}

// ---------------------------------------------------------------------------
// Syscall stubs
// ---------------------------------------------------------------------------

static RUNTIME: Once = Once::new();

struct Runtime;

impl SyscallStubs for Runtime {
    fn sol_get_clock_sysvar(&self, var_addr: *mut u8) -> u64 {
        let clock = Clock {
            unix_timestamp: NOW,
            ..Clock::default()
        };
        unsafe { std::ptr::write(var_addr as *mut Clock, clock) };
        SUCCESS
    }

    fn sol_get_rent_sysvar(&self, var_addr: *mut u8) -> u64 {
        unsafe { std::ptr::write(var_addr as *mut Rent, Rent::default()) };
        SUCCESS
    }

    fn sol_invoke_signed(
        &self,
        instruction: &Instruction,
        account_infos: &[AccountInfo],
        signers_seeds: &[&[&[u8]]],
    ) -> ProgramResult {
        system_program_call(instruction, account_infos, signers_seeds)
    }
}

fn system_program_call(
    ix: &Instruction,
    infos: &[AccountInfo],
    signers_seeds: &[&[&[u8]]],
) -> ProgramResult {
    assert_eq!(ix.program_id, system_program::ID, "unexpected CPI target");

    let signed = signers_seeds
        .iter()
        .map(|seeds| Pubkey::create_program_address(seeds, &depoll::ID))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ProgramError::InvalidSeeds)?;
    let authorize = |info: &AccountInfo| {
        if info.is_signer || signed.contains(info.key) {
            Ok(())
        } else {
            Err(ProgramError::MissingRequiredSignature)
        }
    };

    let call: SystemInstruction =
        bincode::deserialize(&ix.data).map_err(|_| ProgramError::InvalidInstructionData)?;
    match call {
        SystemInstruction::CreateAccount {
            lamports,
            space,
            owner,
        } => {
            let from = cpi_account(ix, infos, 0)?;
            let to = cpi_account(ix, infos, 1)?;
            authorize(from)?;
            authorize(to)?;
            if to.lamports() != 0 || !to.data_is_empty() {
                return Err(ProgramError::AccountAlreadyInitialized);
            }
            move_lamports(from, to, lamports)?;
            to.resize(space as usize)?;
            to.assign(&owner);
        }
        SystemInstruction::Transfer { lamports } => {
            let from = cpi_account(ix, infos, 0)?;
            let to = cpi_account(ix, infos, 1)?;
            authorize(from)?;
            if !from.data_is_empty() {
                return Err(ProgramError::InvalidArgument);
            }
            move_lamports(from, to, lamports)?;
        }
        SystemInstruction::Allocate { space } => {
            let target = cpi_account(ix, infos, 0)?;
            authorize(target)?;
            target.resize(space as usize)?;
        }
        SystemInstruction::Assign { owner } => {
            let target = cpi_account(ix, infos, 0)?;
            authorize(target)?;
            target.assign(&owner);
        }
        other => panic!("unexpected System Program call {other:?}"),
    }
    Ok(())
}

fn cpi_account<'a, 'info>(
    ix: &Instruction,
    infos: &'a [AccountInfo<'info>],
    position: usize,
) -> Result<&'a AccountInfo<'info>, ProgramError> {
    let key = ix
        .accounts
        .get(position)
        .ok_or(ProgramError::NotEnoughAccountKeys)?
        .pubkey;
    infos
        .iter()
        .find(|info| *info.key == key)
        .ok_or(ProgramError::NotEnoughAccountKeys)
}

fn move_lamports(from: &AccountInfo, to: &AccountInfo, lamports: u64) -> ProgramResult {
    let balance = from.lamports();
    if balance < lamports {
        return Err(ProgramError::InsufficientFunds);
    }
    **from.try_borrow_mut_lamports()? = balance - lamports;
    let credited = to
        .lamports()
        .checked_add(lamports)
        .ok_or(ProgramError::ArithmeticOverflow)?;
    **to.try_borrow_mut_lamports()? = credited;
    Ok(())
}

// ---------------------------------------------------------------------------
// Account store
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoredAccount {
    pub lamports: u64,
    pub data: Vec<u8>,
    pub owner: Pubkey,
    pub executable: bool,
}

/// Accounts of a single test, plus the registry authority.
pub struct Bank {
    accounts: BTreeMap<Pubkey, StoredAccount>,
    pub authority: Pubkey,
}

impl Bank {
    /// Fresh store with an initialized registry, as left by
    /// `initialize_registry`.
    pub fn new(count_polls: bool, charge_fees: bool) -> Self {
        RUNTIME.call_once(|| {
            set_syscall_stubs(Box::new(Runtime));
        });

        let mut bank = Self {
            accounts: BTreeMap::new(),
            authority: identity(100),
        };
        bank.accounts.insert(
            system_program::ID,
            StoredAccount {
                lamports: 1,
                executable: true,
                ..StoredAccount::default()
            },
        );
        bank.fund(bank.authority);

        let (registry, bump) = Pubkey::find_program_address(&[REGISTRY_SEED], &depoll::ID);
        let mut state = Registry::default();
        state.initialize(bank.authority, bump, count_polls, charge_fees);
        bank.put(registry, &state);
        bank
    }

    /// Gives `key` a system-owned balance and returns it.
    pub fn fund(&mut self, key: Pubkey) -> Pubkey {
        self.accounts.insert(
            key,
            StoredAccount {
                lamports: STARTING_BALANCE,
                ..StoredAccount::default()
            },
        );
        key
    }

    pub fn user(&mut self, n: u8) -> Pubkey {
        self.fund(identity(n))
    }

    fn put<T: AccountSerialize>(&mut self, key: Pubkey, value: &T) {
        let mut data = Vec::new();
        value.try_serialize(&mut data).unwrap();
        self.accounts.insert(
            key,
            StoredAccount {
                lamports: Rent::default().minimum_balance(data.len()),
                data,
                owner: depoll::ID,
                executable: false,
            },
        );
    }

    pub fn account(&self, key: &Pubkey) -> Option<&StoredAccount> {
        self.accounts.get(key)
    }

    pub fn lamports(&self, key: &Pubkey) -> u64 {
        self.accounts.get(key).map_or(0, |account| account.lamports)
    }

    pub fn total_lamports(&self) -> u64 {
        self.accounts.values().map(|account| account.lamports).sum()
    }

    fn load<T: AccountDeserialize>(&self, key: &Pubkey) -> Option<T> {
        let account = self.accounts.get(key)?;
        if account.owner != depoll::ID || account.data.is_empty() {
            return None;
        }
        Some(T::try_deserialize(&mut &account.data[..]).unwrap())
    }

    pub fn registry(&self) -> Registry {
        self.load(&registry_address()).unwrap()
    }

    pub fn poll(&self, owner: &Pubkey) -> Option<Poll> {
        self.load(&poll_address(owner))
    }

    pub fn poll_view(&self, owner: &Pubkey) -> PollView {
        PollView::lookup(*owner, self.poll(owner).as_ref())
    }

    pub fn proposal_count(&self, owner: &Pubkey) -> u64 {
        self.poll(owner).map_or(0, |poll| poll.proposal_count())
    }

    /// Address of proposal `index` under the poll's current generation.
    pub fn proposal_address(&self, owner: &Pubkey, index: u64) -> Pubkey {
        let generation = self.poll(owner).map_or(0, |poll| poll.ledger.generation);
        Proposal::address(&poll_address(owner), generation, index).0
    }

    pub fn proposal(&self, owner: &Pubkey, index: u64) -> Option<Proposal> {
        self.load(&self.proposal_address(owner, index))
    }

    // -----------------------------------------------------------------------
    // Instructions
    // -----------------------------------------------------------------------

    pub fn update_registry(
        &mut self,
        authority: Pubkey,
        count_polls: bool,
        charge_fees: bool,
    ) -> ProgramResult {
        self.process(
            depoll::accounts::UpdateRegistry {
                authority,
                registry: registry_address(),
            },
            depoll::instruction::UpdateRegistry {
                count_polls,
                charge_fees,
            },
        )
    }

    pub fn withdraw_fees(&mut self, authority: Pubkey, amount: u64) -> ProgramResult {
        self.process(
            depoll::accounts::WithdrawFees {
                authority,
                registry: registry_address(),
            },
            depoll::instruction::WithdrawFees { amount },
        )
    }

    pub fn create_poll(&mut self, owner: Pubkey, avatar_url: &str, title: &str, about: &str) -> ProgramResult {
        self.process(
            depoll::accounts::CreatePoll {
                owner,
                registry: registry_address(),
                poll_account: poll_address(&owner),
                system_program: system_program::ID,
            },
            depoll::instruction::CreatePoll {
                avatar_url: avatar_url.to_string(),
                title: title.to_string(),
                about: about.to_string(),
            },
        )
    }

    pub fn edit_poll(&mut self, owner: Pubkey, avatar_url: &str, title: &str, about: &str) -> ProgramResult {
        self.process(
            depoll::accounts::EditPoll {
                owner,
                poll_account: poll_address(&owner),
                system_program: system_program::ID,
            },
            depoll::instruction::EditPoll {
                avatar_url: avatar_url.to_string(),
                title: title.to_string(),
                about: about.to_string(),
            },
        )
    }

    pub fn overwrite_with_new_poll(
        &mut self,
        owner: Pubkey,
        avatar_url: &str,
        title: &str,
        about: &str,
    ) -> ProgramResult {
        self.process(
            depoll::accounts::OverwritePoll {
                owner,
                poll_account: poll_address(&owner),
                system_program: system_program::ID,
            },
            depoll::instruction::OverwriteWithNewPoll {
                avatar_url: avatar_url.to_string(),
                title: title.to_string(),
                about: about.to_string(),
            },
        )
    }

    pub fn propose(&mut self, proposer: Pubkey, owner: Pubkey, title: &str, payment: u64) -> ProgramResult {
        let next = self.proposal_count(&owner);
        let proposal_account = self.proposal_address(&owner, next);
        self.propose_into(proposer, owner, proposal_account, title, payment)
    }

    pub fn propose_into(
        &mut self,
        proposer: Pubkey,
        owner: Pubkey,
        proposal_account: Pubkey,
        title: &str,
        payment: u64,
    ) -> ProgramResult {
        self.process(
            depoll::accounts::Propose {
                proposer,
                registry: registry_address(),
                poll_owner: owner,
                poll_account: poll_address(&owner),
                proposal_account,
                system_program: system_program::ID,
            },
            depoll::instruction::Propose {
                title: title.to_string(),
                payment,
            },
        )
    }

    pub fn upvote(&mut self, voter: Pubkey, owner: Pubkey, index: u64, payment: u64) -> ProgramResult {
        let accounts = self.vote_accounts(voter, owner, index);
        self.process(accounts, depoll::instruction::Upvote { index, payment })
    }

    pub fn downvote(&mut self, voter: Pubkey, owner: Pubkey, index: u64, payment: u64) -> ProgramResult {
        let accounts = self.vote_accounts(voter, owner, index);
        self.process(accounts, depoll::instruction::Downvote { index, payment })
    }

    fn vote_accounts(&self, voter: Pubkey, owner: Pubkey, index: u64) -> depoll::accounts::CastVote {
        depoll::accounts::CastVote {
            voter,
            registry: registry_address(),
            poll_owner: owner,
            poll_account: poll_address(&owner),
            proposal_account: self.proposal_address(&owner, index),
            system_program: system_program::ID,
        }
    }

    pub fn end_cycle(&mut self, caller: Pubkey, owner: Pubkey) -> ProgramResult {
        self.process(
            depoll::accounts::EndCycle {
                caller,
                poll_owner: owner,
                poll_account: poll_address(&owner),
                system_program: system_program::ID,
            },
            depoll::instruction::EndCycle {},
        )
    }

    pub fn get_poll(&mut self, owner: Pubkey) -> ProgramResult {
        self.process(
            depoll::accounts::ReadPoll {
                poll_owner: owner,
                poll_account: poll_address(&owner),
            },
            depoll::instruction::GetPoll {},
        )
    }

    pub fn get_proposal_count(&mut self, owner: Pubkey) -> ProgramResult {
        self.process(
            depoll::accounts::ReadPoll {
                poll_owner: owner,
                poll_account: poll_address(&owner),
            },
            depoll::instruction::GetProposalCount {},
        )
    }

    pub fn get_proposal(&mut self, owner: Pubkey, index: u64) -> ProgramResult {
        let proposal_account = self.proposal_address(&owner, index);
        self.process(
            depoll::accounts::ReadProposal {
                poll_owner: owner,
                poll_account: poll_address(&owner),
                proposal_account,
            },
            depoll::instruction::GetProposal { index },
        )
    }

    pub fn get_proposal_range(&mut self, owner: Pubkey, cycle: u64) -> ProgramResult {
        self.process(
            depoll::accounts::ReadPoll {
                poll_owner: owner,
                poll_account: poll_address(&owner),
            },
            depoll::instruction::GetProposalRange { cycle },
        )
    }

    pub fn total_polls(&mut self) -> ProgramResult {
        self.process(
            depoll::accounts::ReadRegistry {
                registry: registry_address(),
            },
            depoll::instruction::TotalPolls {},
        )
    }

    // -----------------------------------------------------------------------
    // Execution
    // -----------------------------------------------------------------------

    fn process(&mut self, accounts: impl ToAccountMetas, args: impl InstructionData) -> ProgramResult {
        self.execute(Instruction {
            program_id: depoll::ID,
            accounts: accounts.to_account_metas(None),
            data: args.data(),
        })
    }

    /// Runs one instruction atomically: on error nothing is written back.
    pub fn execute(&mut self, ix: Instruction) -> ProgramResult {
        let mut input = self.serialize(&ix);
        let before = self.total_lamports();

        let updates = unsafe {
            let (program_id, infos, data) = deserialize(input.as_mut_ptr() as *mut u8);
            depoll::entry(program_id, &infos, data)?;
            infos
                .iter()
                .map(|info| {
                    let account = StoredAccount {
                        lamports: info.lamports(),
                        data: info.data.borrow().to_vec(),
                        owner: *info.owner,
                        executable: info.executable,
                    };
                    (*info.key, account)
                })
                .collect::<Vec<_>>()
        };

        self.accounts.extend(updates);
        assert_eq!(before, self.total_lamports(), "instruction created or burned lamports");
        Ok(())
    }

    /// Lays the accounts out as the loader does, in a `u64` buffer so every
    /// field keeps its alignment.
    fn serialize(&self, ix: &Instruction) -> Vec<u64> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(ix.accounts.len() as u64).to_le_bytes());

        for (position, meta) in ix.accounts.iter().enumerate() {
            if let Some(first) = ix.accounts[..position]
                .iter()
                .position(|earlier| earlier.pubkey == meta.pubkey)
            {
                bytes.push(first as u8);
                bytes.extend_from_slice(&[0; 7]);
                continue;
            }

            let is_signer = ix
                .accounts
                .iter()
                .any(|other| other.pubkey == meta.pubkey && other.is_signer);
            let is_writable = ix
                .accounts
                .iter()
                .any(|other| other.pubkey == meta.pubkey && other.is_writable);
            let account = self.accounts.get(&meta.pubkey).cloned().unwrap_or_default();

            bytes.push(NON_DUP_MARKER);
            bytes.push(is_signer as u8);
            bytes.push(is_writable as u8);
            bytes.push(account.executable as u8);
            bytes.extend_from_slice(&[0; 4]);
            bytes.extend_from_slice(meta.pubkey.as_ref());
            bytes.extend_from_slice(account.owner.as_ref());
            bytes.extend_from_slice(&account.lamports.to_le_bytes());
            bytes.extend_from_slice(&(account.data.len() as u64).to_le_bytes());
            bytes.extend_from_slice(&account.data);
            bytes.resize(bytes.len() + MAX_PERMITTED_DATA_INCREASE, 0);
            bytes.resize(bytes.len().next_multiple_of(8), 0);
            bytes.extend_from_slice(&0u64.to_le_bytes());
        }

        bytes.extend_from_slice(&(ix.data.len() as u64).to_le_bytes());
        bytes.extend_from_slice(&ix.data);
        bytes.extend_from_slice(ix.program_id.as_ref());

        let mut input = vec![0u64; bytes.len().div_ceil(8)];
        unsafe {
            std::ptr::copy_nonoverlapping(bytes.as_ptr(), input.as_mut_ptr() as *mut u8, bytes.len());
        }
        input
    }
}
